//! Free-text filtering

use pe_model::Record;

/// Keep records where the query appears in any value, case-insensitively
///
/// Every field is searched, including the id and fields no column shows.
/// An empty query keeps everything. Input order is preserved.
#[must_use]
pub fn filter<'a>(records: &'a [Record], query: &str) -> Vec<&'a Record> {
    if query.is_empty() {
        return records.iter().collect();
    }
    let needle = query.to_lowercase();
    records.iter().filter(|r| matches(r, &needle)).collect()
}

/// Check a record against an already lowercased needle
#[inline]
#[must_use]
pub fn matches(record: &Record, needle: &str) -> bool {
    record
        .searchable_strings()
        .any(|value| value.to_lowercase().contains(needle))
}
