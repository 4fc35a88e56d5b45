use serde::Deserialize;

/// How repeatable clauses (`aggregate`, `sort`) are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryShape {
    /// A single entry renders as an object, two or more as an array.
    ///
    /// This is the shape the storage service has always accepted.
    #[default]
    Collapse,
    /// Always render an array, even for a single entry.
    AlwaysSequence,
}

/// Rendering options for a [`PayloadBuilder`](crate::PayloadBuilder).
///
/// Can be deserialized so it may live inside a caller's own config file:
///
/// ```ignore
/// let config: PayloadConfig = serde_json::from_str(r#"{"entry_shape": "always_sequence"}"#)?;
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PayloadConfig {
    /// Shape of `aggregate` and `sort`. Default is [`EntryShape::Collapse`].
    pub entry_shape: EntryShape,
}

impl PayloadConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the shape used for repeatable clauses.
    pub fn with_entry_shape(mut self, shape: EntryShape) -> Self {
        self.entry_shape = shape;
        self
    }

    /// Always render `aggregate` and `sort` as arrays.
    pub fn always_sequence(mut self) -> Self {
        self.entry_shape = EntryShape::AlwaysSequence;
        self
    }
}
