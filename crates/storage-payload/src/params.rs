//! URL query-parameter rendering for filter-only lookups.
//!
//! Read paths that address the storage service by `?column=value` instead of
//! a JSON payload only need the equality filters, so this renders the root
//! condition and every `and`-combined condition. `or`-combined conditions are
//! left out: a flat parameter list cannot express them.

use crate::condition::WhereClause;
use indexmap::IndexMap;

/// Render `column=value&..` for a WHERE clause.
///
/// Values are `application/x-www-form-urlencoded`. When a column repeats, the
/// later value wins but the column keeps its first position.
pub fn encode_where(clause: &WhereClause) -> String {
    let mut pairs: IndexMap<&str, String> = IndexMap::new();
    for condition in clause.and_conditions() {
        pairs.insert(condition.column(), condition.value().to_param_string());
    }

    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (column, value) in &pairs {
        serializer.append_pair(column, value);
    }
    serializer.finish()
}
