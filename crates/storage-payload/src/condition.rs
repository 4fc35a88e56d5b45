//! Filter conditions and the WHERE clause they form.
//!
//! This module provides [`Operator`] and [`Condition`] primitives, plus the
//! [`WhereClause`] that chains `and`/`or` conditions onto a root condition.
//!
//! # Example
//! ```ignore
//! use storage_payload::{Condition, Operator};
//!
//! let c = Condition::new("id", Operator::Eq, "test")?;
//! let c = Condition::parse("type", ">=", 3)?;
//! # Ok::<(), storage_payload::PayloadError>(())
//! ```

use crate::error::{PayloadError, PayloadResult};
use crate::scalar::Scalar;
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Comparison operator accepted by the storage service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `=`
    Eq,
    /// `>=`
    Gte,
    /// `<=`
    Lte,
    /// `LIKE`
    Like,
    /// `IN`
    In,
    /// `!=`
    Ne,
}

impl Operator {
    pub const ALL: [Operator; 8] = [
        Operator::Lt,
        Operator::Gt,
        Operator::Eq,
        Operator::Gte,
        Operator::Lte,
        Operator::Like,
        Operator::In,
        Operator::Ne,
    ];

    /// The operator as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Lt => "<",
            Operator::Gt => ">",
            Operator::Eq => "=",
            Operator::Gte => ">=",
            Operator::Lte => "<=",
            Operator::Like => "LIKE",
            Operator::In => "IN",
            Operator::Ne => "!=",
        }
    }
}

impl FromStr for Operator {
    type Err = PayloadError;

    /// Operators are matched exactly; `like` is not `LIKE`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operator::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| PayloadError::invalid_condition(format!("unknown operator '{s}'")))
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns `true` if `(column, operator)` form a well-shaped condition.
///
/// The column must be non-empty and the operator one of [`Operator::ALL`].
pub fn is_valid_condition(column: &str, operator: &str) -> bool {
    !column.is_empty() && operator.parse::<Operator>().is_ok()
}

/// A single `column operator value` comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    column: String,
    operator: Operator,
    value: Scalar,
}

impl Condition {
    /// Create a condition from a typed operator.
    pub fn new(
        column: impl Into<String>,
        operator: Operator,
        value: impl Into<Scalar>,
    ) -> PayloadResult<Self> {
        let column = column.into();
        if column.is_empty() {
            return Err(PayloadError::invalid_condition("column cannot be empty"));
        }
        Ok(Self {
            column,
            operator,
            value: value.into(),
        })
    }

    /// Create a condition from operator text such as `"="` or `"LIKE"`.
    pub fn parse(
        column: impl Into<String>,
        operator: &str,
        value: impl Into<Scalar>,
    ) -> PayloadResult<Self> {
        let operator = operator.parse()?;
        Self::new(column, operator, value)
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn value(&self) -> &Scalar {
        &self.value
    }

    pub(crate) fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("column".to_string(), Value::String(self.column.clone()));
        map.insert(
            "condition".to_string(),
            Value::String(self.operator.as_str().to_string()),
        );
        map.insert("value".to_string(), self.value.to_json());
        map
    }
}

/// Convert an input into a [`Condition`].
///
/// This is mainly for ergonomics in builder APIs: tuples of
/// `(column, "op", value)` are validated on conversion.
pub trait IntoCondition {
    fn into_condition(self) -> PayloadResult<Condition>;
}

impl IntoCondition for Condition {
    fn into_condition(self) -> PayloadResult<Condition> {
        Ok(self)
    }
}

impl IntoCondition for &Condition {
    fn into_condition(self) -> PayloadResult<Condition> {
        Ok(self.clone())
    }
}

impl<C, V> IntoCondition for (C, &str, V)
where
    C: Into<String>,
    V: Into<Scalar>,
{
    fn into_condition(self) -> PayloadResult<Condition> {
        Condition::parse(self.0, self.1, self.2)
    }
}

impl<C, V> IntoCondition for (C, Operator, V)
where
    C: Into<String>,
    V: Into<Scalar>,
{
    fn into_condition(self) -> PayloadResult<Condition> {
        Condition::new(self.0, self.1, self.2)
    }
}

/// How a chained condition combines with the ones before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Link {
    And,
    Or,
}

impl Link {
    /// Key the chained condition is nested under.
    pub fn key(&self) -> &'static str {
        match self {
            Link::And => "and",
            Link::Or => "or",
        }
    }
}

/// A root condition with zero or more `and`/`or` conditions chained on.
#[derive(Debug, Clone, PartialEq)]
pub struct WhereClause {
    root: Condition,
    chain: Vec<(Link, Condition)>,
}

impl WhereClause {
    pub fn new(root: Condition) -> Self {
        Self {
            root,
            chain: Vec::new(),
        }
    }

    pub fn root(&self) -> &Condition {
        &self.root
    }

    /// Chained conditions in the order they were added.
    pub fn chain(&self) -> &[(Link, Condition)] {
        &self.chain
    }

    pub(crate) fn push(&mut self, link: Link, condition: Condition) {
        self.chain.push((link, condition));
    }

    /// The root followed by every `and`-combined condition.
    pub fn and_conditions(&self) -> impl Iterator<Item = &Condition> {
        std::iter::once(&self.root).chain(
            self.chain
                .iter()
                .filter(|(link, _)| *link == Link::And)
                .map(|(_, c)| c),
        )
    }

    /// Render with the `and` and `or` chains side by side on the root.
    ///
    /// Repeats of one link nest under the previous condition of the same
    /// link, e.g. `{.., "and": {.., "and": {..}}, "or": {..}}`. The root keys
    /// appear in the order their first condition was added.
    pub(crate) fn to_json(&self) -> Value {
        let mut root = self.root.to_map();
        let mut links: Vec<Link> = Vec::with_capacity(2);
        for (link, _) in &self.chain {
            if !links.contains(link) {
                links.push(*link);
            }
        }

        for link in links {
            let nested = self
                .chain
                .iter()
                .filter(|(l, _)| *l == link)
                .rev()
                .fold(None, |inner: Option<Map<String, Value>>, (_, condition)| {
                    let mut node = condition.to_map();
                    if let Some(inner) = inner {
                        node.insert(link.key().to_string(), Value::Object(inner));
                    }
                    Some(node)
                });
            if let Some(node) = nested {
                root.insert(link.key().to_string(), Value::Object(node));
            }
        }
        Value::Object(root)
    }
}
