//! Clause accumulator.
//!
//! [`PayloadBuilder`] collects clauses as they are added and renders them to a
//! [`Payload`] on demand.
//!
//! ## Design
//!
//! - Every clause is validated when it is added; a bad clause is an error at
//!   that call, never a silent no-op.
//! - Methods take `&mut self` and return the builder, so calls chain. Fallible
//!   methods return `PayloadResult<&mut Self>` and chain with `?`.
//! - Rendering is side-effect free and cannot fail.

use crate::condition::{IntoCondition, Link, WhereClause};
use crate::config::PayloadConfig;
use crate::entry::{Aggregate, Entries, IntoAggregate, IntoSort, Sort};
use crate::error::{PayloadError, PayloadResult};
use crate::params;
use crate::payload::Payload;
use crate::scalar::Scalar;
use crate::transport::StorageTransport;
use indexmap::IndexMap;
use serde_json::{Map, Value};

const COLUMNS: &str = "columns";
const TABLE: &str = "table";
const VALUES: &str = "values";
const WHERE: &str = "where";
const GROUP: &str = "group";
const AGGREGATE: &str = "aggregate";
const SORT: &str = "sort";
const LIMIT: &str = "limit";

/// Internal representation of one top-level payload entry.
#[derive(Debug, Clone, PartialEq)]
enum Clause {
    Columns(String),
    Table(String),
    Values(IndexMap<String, Scalar>),
    Where(WhereClause),
    Group(String),
    Aggregate(Entries<Aggregate>),
    Sort(Entries<Sort>),
    Limit(i64),
    /// A column merged flat into the payload by `insert`.
    Column(Scalar),
}

/// Fluent builder for storage service payloads.
///
/// # Example
/// ```ignore
/// use storage_payload::PayloadBuilder;
///
/// let mut pb = PayloadBuilder::new();
/// pb.select(["id", "type"])
///     .from("schedules")
///     .where_(("id", "=", "test"))?
///     .where_and([("process_name", "=", "sleep")])?
///     .limit(3);
///
/// let json = pb.render().to_json();
/// # Ok::<(), storage_payload::PayloadError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct PayloadBuilder {
    clauses: IndexMap<String, Clause>,
    config: PayloadConfig,
}

impl PayloadBuilder {
    /// Create an empty builder with default rendering options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty builder with the given rendering options.
    pub fn with_config(config: PayloadConfig) -> Self {
        Self {
            clauses: IndexMap::new(),
            config,
        }
    }

    /// The config this builder renders with.
    pub fn config(&self) -> &PayloadConfig {
        &self.config
    }

    /// Check if no clause has been added.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Check if a root condition has been set.
    pub fn has_where(&self) -> bool {
        self.where_clause().is_some()
    }

    /// The current WHERE clause, if any.
    pub fn where_clause(&self) -> Option<&WhereClause> {
        match self.clauses.get(WHERE) {
            Some(Clause::Where(clause)) => Some(clause),
            _ => None,
        }
    }

    fn set(&mut self, key: &str, clause: Clause) {
        // Re-setting a key keeps its original position.
        self.clauses.insert(key.to_string(), clause);
    }

    // ==================== Columns & table ====================

    /// Set the selected columns. An empty list keeps the implicit "all columns".
    pub fn select<I>(&mut self, columns: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let columns = join(columns, ",");
        if !columns.is_empty() {
            self.set(COLUMNS, Clause::Columns(columns));
        }
        self
    }

    /// Select all columns. The payload says nothing about columns in this case.
    pub fn select_all(&mut self) -> &mut Self {
        self
    }

    /// Set the target table.
    pub fn from(&mut self, table: impl Into<String>) -> &mut Self {
        self.set(TABLE, Clause::Table(table.into()));
        self
    }

    /// Alias for [`from`](Self::from), for UPDATE payloads.
    pub fn update_table(&mut self, table: impl Into<String>) -> &mut Self {
        self.from(table)
    }

    /// Alias for [`from`](Self::from), for INSERT payloads.
    pub fn insert_into(&mut self, table: impl Into<String>) -> &mut Self {
        self.from(table)
    }

    /// Alias for [`from`](Self::from), for DELETE payloads.
    pub fn delete(&mut self, table: impl Into<String>) -> &mut Self {
        self.from(table)
    }

    // ==================== Values ====================

    /// Set the columns to update, nested under `values`.
    pub fn update<I, K, V>(&mut self, columns: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Scalar>,
    {
        let values = columns
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.set(VALUES, Clause::Values(values));
        self
    }

    /// Merge the columns to insert directly into the top level of the payload.
    ///
    /// Unlike [`update`](Self::update) nothing is nested under `values`; the
    /// storage service expects INSERT rows flat next to `table`.
    pub fn insert<I, K, V>(&mut self, columns: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Scalar>,
    {
        for (column, value) in columns {
            let column = column.into();
            self.clauses.insert(column, Clause::Column(value.into()));
        }
        self
    }

    // ==================== Conditions ====================

    /// Set the root condition, replacing any previous WHERE clause and
    /// everything chained onto it.
    pub fn where_(&mut self, condition: impl IntoCondition) -> PayloadResult<&mut Self> {
        let condition = condition
            .into_condition()
            .map_err(|e| rejected(WHERE, e))?;
        self.set(WHERE, Clause::Where(WhereClause::new(condition)));
        Ok(self)
    }

    /// Chain conditions combined with `and`.
    pub fn where_and<I>(&mut self, conditions: I) -> PayloadResult<&mut Self>
    where
        I: IntoIterator,
        I::Item: IntoCondition,
    {
        self.chain(Link::And, conditions)
    }

    /// Chain conditions combined with `or`.
    pub fn where_or<I>(&mut self, conditions: I) -> PayloadResult<&mut Self>
    where
        I: IntoIterator,
        I::Item: IntoCondition,
    {
        self.chain(Link::Or, conditions)
    }

    fn chain<I>(&mut self, link: Link, conditions: I) -> PayloadResult<&mut Self>
    where
        I: IntoIterator,
        I::Item: IntoCondition,
    {
        if !self.has_where() {
            return Err(rejected(link.key(), PayloadError::MissingWhereClause));
        }

        // All or nothing: validate the whole batch before attaching.
        let conditions = conditions
            .into_iter()
            .map(IntoCondition::into_condition)
            .collect::<PayloadResult<Vec<_>>>()
            .map_err(|e| rejected(link.key(), e))?;

        if let Some(Clause::Where(clause)) = self.clauses.get_mut(WHERE) {
            for condition in conditions {
                clause.push(link, condition);
            }
        }
        Ok(self)
    }

    // ==================== Grouping & aggregates ====================

    /// Set the GROUP BY columns. An empty list is a no-op.
    pub fn group_by<I>(&mut self, columns: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let columns = join(columns, ", ");
        if !columns.is_empty() {
            self.set(GROUP, Clause::Group(columns));
        }
        self
    }

    /// Append aggregates such as `("count", "id")`.
    ///
    /// One aggregate renders as an object; from the second on they render as
    /// an array (unless configured otherwise).
    pub fn aggregate<I>(&mut self, aggregates: I) -> PayloadResult<&mut Self>
    where
        I: IntoIterator,
        I::Item: IntoAggregate,
    {
        let aggregates = aggregates
            .into_iter()
            .map(IntoAggregate::into_aggregate)
            .collect::<PayloadResult<Vec<_>>>()
            .map_err(|e| rejected(AGGREGATE, e))?;
        if aggregates.is_empty() {
            return Ok(self);
        }

        let mut entries = match self.clauses.get_mut(AGGREGATE) {
            Some(Clause::Aggregate(entries)) => std::mem::take(entries),
            _ => Entries::Empty,
        };
        for aggregate in aggregates {
            entries.push(aggregate);
        }
        self.set(AGGREGATE, Clause::Aggregate(entries));
        Ok(self)
    }

    /// HAVING is not supported by the storage payload format.
    pub fn having(&mut self) -> PayloadResult<&mut Self> {
        Err(rejected("having", PayloadError::Unsupported("HAVING")))
    }

    // ==================== Sort & limit ====================

    /// Append sort entries such as `("id", "desc")`. Directions are
    /// case-insensitive.
    pub fn order_by<I>(&mut self, sorts: I) -> PayloadResult<&mut Self>
    where
        I: IntoIterator,
        I::Item: IntoSort,
    {
        let sorts = sorts
            .into_iter()
            .map(IntoSort::into_sort)
            .collect::<PayloadResult<Vec<_>>>()
            .map_err(|e| rejected(SORT, e))?;
        if sorts.is_empty() {
            return Ok(self);
        }

        let mut entries = match self.clauses.get_mut(SORT) {
            Some(Clause::Sort(entries)) => std::mem::take(entries),
            _ => Entries::Empty,
        };
        for sort in sorts {
            entries.push(sort);
        }
        self.set(SORT, Clause::Sort(entries));
        Ok(self)
    }

    /// Set LIMIT. Zero and negative values are passed through unchanged.
    pub fn limit(&mut self, n: i64) -> &mut Self {
        self.set(LIMIT, Clause::Limit(n));
        self
    }

    /// Set LIMIT from a dynamically typed value (e.g. parsed from a request).
    ///
    /// Only whole numbers are accepted.
    pub fn limit_value(&mut self, value: impl Into<Scalar>) -> PayloadResult<&mut Self> {
        let value = value.into();
        match value.as_int() {
            Some(n) => Ok(self.limit(n)),
            None => Err(rejected(
                LIMIT,
                PayloadError::TypeMismatch {
                    expected: "integer",
                    found: value.kind(),
                },
            )),
        }
    }

    // ==================== Rendering ====================

    /// Render the accumulated clauses.
    pub fn render(&self) -> Payload {
        let mut map = Map::with_capacity(self.clauses.len());
        for (key, clause) in &self.clauses {
            let value = match clause {
                Clause::Columns(s) | Clause::Table(s) | Clause::Group(s) => {
                    Some(Value::String(s.clone()))
                }
                Clause::Values(values) => Some(Value::Object(
                    values
                        .iter()
                        .map(|(k, v)| (k.clone(), v.to_json()))
                        .collect(),
                )),
                Clause::Where(clause) => Some(clause.to_json()),
                Clause::Aggregate(entries) => entries.to_json(self.config.entry_shape),
                Clause::Sort(entries) => entries.to_json(self.config.entry_shape),
                Clause::Limit(n) => Some(Value::from(*n)),
                Clause::Column(value) => Some(value.to_json()),
            };
            if let Some(value) = value {
                map.insert(key.clone(), value);
            }
        }

        tracing::trace!(target: "storage_payload", clauses = map.len(), "rendered payload");
        Payload::from_map(map)
    }

    /// Render the WHERE clause as URL query parameters (`column=value&..`).
    ///
    /// Only the root condition and `and`-combined conditions are included.
    pub fn render_query_params(&self) -> PayloadResult<String> {
        let clause = self
            .where_clause()
            .ok_or_else(|| rejected("query params", PayloadError::MissingWhereClause))?;
        Ok(params::encode_where(clause))
    }

    // ==================== Transport ====================

    /// Render to JSON and send it to `table` through `transport`.
    pub fn query_with<T: StorageTransport>(
        &self,
        transport: &T,
        table: &str,
    ) -> Result<T::Output, T::Error> {
        let payload = self.render().to_json();
        tracing::debug!(target: "storage_payload", table, payload = %payload, "sending payload");
        transport.query_with_payload(table, &payload)
    }

    /// Render query parameters and look up `table` through `transport`.
    pub fn query_params_with<T: StorageTransport>(
        &self,
        transport: &T,
        table: &str,
    ) -> Result<T::Output, T::Error> {
        let params = self.render_query_params()?;
        tracing::debug!(target: "storage_payload", table, params = %params, "sending query params");
        transport.query(table, &params)
    }
}

fn join<I>(columns: I, separator: &str) -> String
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut out = String::new();
    for (i, column) in columns.into_iter().enumerate() {
        if i > 0 {
            out.push_str(separator);
        }
        out.push_str(column.as_ref());
    }
    out
}

fn rejected(clause: &str, err: PayloadError) -> PayloadError {
    tracing::debug!(target: "storage_payload", clause, error = %err, "clause rejected");
    err
}
