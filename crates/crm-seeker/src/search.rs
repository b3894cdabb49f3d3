//! Free-text search across every field of a record.

use crate::value::{FieldValue, Record};

/// Returns `true` if any field of the record contains `needle`.
///
/// `needle` must already be lowercased. Lists match element by element;
/// every other value is compared through its text form.
pub fn record_matches(record: &Record, needle: &str) -> bool {
    record.values().any(|value| match value {
        FieldValue::List(items) => items.iter().any(|item| item.to_lowercase().contains(needle)),
        FieldValue::String(s) => s.to_lowercase().contains(needle),
        other => other.to_text().to_lowercase().contains(needle),
    })
}

/// Keeps the records matching a case-insensitive search term.
///
/// A blank term (empty or whitespace only) keeps everything.
pub fn apply_search(records: Vec<Record>, term: &str) -> Vec<Record> {
    if is_blank(term) {
        return records;
    }
    let needle = term.to_lowercase();
    records
        .into_iter()
        .filter(|record| record_matches(record, &needle))
        .collect()
}

/// Returns `true` for terms that skip the search stage.
pub fn is_blank(term: &str) -> bool {
    term.trim().is_empty()
}
