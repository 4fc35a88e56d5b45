//! Aggregate and sort entries.
//!
//! Both clauses can hold several entries. They are kept in an [`Entries`]
//! value so the one-vs-many wire shape is decided at render time.

use crate::config::EntryShape;
use crate::error::{PayloadError, PayloadResult};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Aggregate function applied to a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregateOp {
    Min,
    Max,
    Avg,
    Sum,
    Count,
}

impl AggregateOp {
    pub const ALL: [AggregateOp; 5] = [
        AggregateOp::Min,
        AggregateOp::Max,
        AggregateOp::Avg,
        AggregateOp::Sum,
        AggregateOp::Count,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AggregateOp::Min => "min",
            AggregateOp::Max => "max",
            AggregateOp::Avg => "avg",
            AggregateOp::Sum => "sum",
            AggregateOp::Count => "count",
        }
    }
}

impl FromStr for AggregateOp {
    type Err = PayloadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AggregateOp::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| PayloadError::invalid_aggregate(format!("unknown operation '{s}'")))
    }
}

impl fmt::Display for AggregateOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort direction. Parsed case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

impl FromStr for Direction {
    type Err = PayloadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(Direction::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(Direction::Desc)
        } else {
            Err(PayloadError::invalid_sort(format!("unknown direction '{s}'")))
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns `true` if `(operation, column)` is a well-shaped aggregate.
pub fn is_valid_aggregate(operation: &str, column: &str) -> bool {
    !column.is_empty() && operation.parse::<AggregateOp>().is_ok()
}

/// Returns `true` if `(column, direction)` is a well-shaped sort.
pub fn is_valid_sort(column: &str, direction: &str) -> bool {
    !column.is_empty() && direction.parse::<Direction>().is_ok()
}

/// One `{"operation", "column"}` aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregate {
    operation: AggregateOp,
    column: String,
}

impl Aggregate {
    pub fn new(operation: AggregateOp, column: impl Into<String>) -> PayloadResult<Self> {
        let column = column.into();
        if column.is_empty() {
            return Err(PayloadError::invalid_aggregate("column cannot be empty"));
        }
        Ok(Self { operation, column })
    }

    pub fn parse(operation: &str, column: impl Into<String>) -> PayloadResult<Self> {
        Self::new(operation.parse()?, column)
    }

    pub fn operation(&self) -> AggregateOp {
        self.operation
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    fn to_json(&self) -> Value {
        let mut map = Map::new();
        map.insert(
            "operation".to_string(),
            Value::String(self.operation.as_str().to_string()),
        );
        map.insert("column".to_string(), Value::String(self.column.clone()));
        Value::Object(map)
    }
}

/// One `{"column", "direction"}` sort.
///
/// The direction text is kept as the caller spelled it (`"desc"` stays
/// `"desc"`); typed constructors use the upper-case form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    column: String,
    direction: Direction,
    spelling: String,
}

impl Sort {
    pub fn new(column: impl Into<String>, direction: Direction) -> PayloadResult<Self> {
        let column = column.into();
        if column.is_empty() {
            return Err(PayloadError::invalid_sort("column cannot be empty"));
        }
        Ok(Self {
            column,
            direction,
            spelling: direction.as_str().to_string(),
        })
    }

    pub fn parse(column: impl Into<String>, direction: &str) -> PayloadResult<Self> {
        let mut sort = Self::new(column, direction.parse()?)?;
        sort.spelling = direction.to_string();
        Ok(sort)
    }

    pub fn asc(column: impl Into<String>) -> PayloadResult<Self> {
        Self::new(column, Direction::Asc)
    }

    pub fn desc(column: impl Into<String>) -> PayloadResult<Self> {
        Self::new(column, Direction::Desc)
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    fn to_json(&self) -> Value {
        let mut map = Map::new();
        map.insert("column".to_string(), Value::String(self.column.clone()));
        map.insert("direction".to_string(), Value::String(self.spelling.clone()));
        Value::Object(map)
    }
}

/// Convert an input into an [`Aggregate`]; `(operation, column)` tuples are
/// validated on conversion.
pub trait IntoAggregate {
    fn into_aggregate(self) -> PayloadResult<Aggregate>;
}

impl IntoAggregate for Aggregate {
    fn into_aggregate(self) -> PayloadResult<Aggregate> {
        Ok(self)
    }
}

impl<C: Into<String>> IntoAggregate for (&str, C) {
    fn into_aggregate(self) -> PayloadResult<Aggregate> {
        Aggregate::parse(self.0, self.1)
    }
}

impl<C: Into<String>> IntoAggregate for (AggregateOp, C) {
    fn into_aggregate(self) -> PayloadResult<Aggregate> {
        Aggregate::new(self.0, self.1)
    }
}

/// Convert an input into a [`Sort`]; `(column, direction)` tuples are
/// validated on conversion.
pub trait IntoSort {
    fn into_sort(self) -> PayloadResult<Sort>;
}

impl IntoSort for Sort {
    fn into_sort(self) -> PayloadResult<Sort> {
        Ok(self)
    }
}

impl<C: Into<String>> IntoSort for (C, &str) {
    fn into_sort(self) -> PayloadResult<Sort> {
        Sort::parse(self.0, self.1)
    }
}

impl<C: Into<String>> IntoSort for (C, Direction) {
    fn into_sort(self) -> PayloadResult<Sort> {
        Sort::new(self.0, self.1)
    }
}

/// Zero, one or many entries of a repeatable clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entries<T> {
    Empty,
    One(T),
    Many(Vec<T>),
}

impl<T> Default for Entries<T> {
    fn default() -> Self {
        Entries::Empty
    }
}

impl<T> Entries<T> {
    /// Append an entry, promoting `One` to `Many` on the second push.
    pub fn push(&mut self, entry: T) {
        *self = match std::mem::take(self) {
            Entries::Empty => Entries::One(entry),
            Entries::One(first) => Entries::Many(vec![first, entry]),
            Entries::Many(mut all) => {
                all.push(entry);
                Entries::Many(all)
            }
        };
    }

    pub fn len(&self) -> usize {
        match self {
            Entries::Empty => 0,
            Entries::One(_) => 1,
            Entries::Many(all) => all.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_slice(&self) -> &[T] {
        match self {
            Entries::Empty => &[],
            Entries::One(entry) => std::slice::from_ref(entry),
            Entries::Many(all) => all,
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    fn render(&self, shape: EntryShape, f: impl Fn(&T) -> Value) -> Option<Value> {
        match (self, shape) {
            (Entries::Empty, _) => None,
            (Entries::One(entry), EntryShape::Collapse) => Some(f(entry)),
            _ => Some(Value::Array(self.iter().map(f).collect())),
        }
    }
}

impl Entries<Aggregate> {
    pub(crate) fn to_json(&self, shape: EntryShape) -> Option<Value> {
        self.render(shape, Aggregate::to_json)
    }
}

impl Entries<Sort> {
    pub(crate) fn to_json(&self, shape: EntryShape) -> Option<Value> {
        self.render(shape, Sort::to_json)
    }
}
