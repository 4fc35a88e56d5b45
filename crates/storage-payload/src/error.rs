//! Error types for storage-payload

use thiserror::Error;

/// Result type alias for payload builder operations
pub type PayloadResult<T> = Result<T, PayloadError>;

/// Errors raised while accumulating clauses.
///
/// Rendering never fails: every invariant is checked when the offending
/// clause is added, so these only surface from builder calls.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PayloadError {
    /// Malformed condition triple or unrecognized operator
    #[error("Invalid condition: {0}")]
    InvalidCondition(String),

    /// Malformed aggregate pair or unrecognized operation
    #[error("Invalid aggregate: {0}")]
    InvalidAggregateSpec(String),

    /// Malformed sort pair or unrecognized direction
    #[error("Invalid sort: {0}")]
    InvalidSortSpec(String),

    /// `and`/`or` chaining or query-parameter rendering without a root condition
    #[error("Missing WHERE clause: add a root condition with `where_` first")]
    MissingWhereClause,

    /// A value of the wrong kind was supplied
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// Clause that the storage payload format does not support yet
    #[error("Unsupported clause: {0}")]
    Unsupported(&'static str),
}

impl PayloadError {
    /// Create an invalid condition error
    pub fn invalid_condition(message: impl Into<String>) -> Self {
        Self::InvalidCondition(message.into())
    }

    /// Create an invalid aggregate error
    pub fn invalid_aggregate(message: impl Into<String>) -> Self {
        Self::InvalidAggregateSpec(message.into())
    }

    /// Create an invalid sort error
    pub fn invalid_sort(message: impl Into<String>) -> Self {
        Self::InvalidSortSpec(message.into())
    }

    /// Check if this is a missing WHERE clause error
    pub fn is_missing_where(&self) -> bool {
        matches!(self, Self::MissingWhereClause)
    }

    /// Check if this is a type mismatch error
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, Self::TypeMismatch { .. })
    }

    /// Check if this error came from clause validation
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidCondition(_) | Self::InvalidAggregateSpec(_) | Self::InvalidSortSpec(_)
        )
    }
}
