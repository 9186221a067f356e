//! Single-column stable sort

use crate::collate;
use pe_model::{FieldValue, Record, SortOrder};
use std::cmp::Ordering;

/// Sort records by one field
///
/// Numeric pairs compare numerically; any other pair compares the string
/// forms with [`collate::compare`]. An absent value stringifies as `""`.
/// `Desc` flips the comparator, so ties keep their input order either way.
#[must_use]
pub fn sort<'a>(records: Vec<&'a Record>, key: &str, order: SortOrder) -> Vec<&'a Record> {
    merge_sort(records, &|a: &Record, b: &Record| {
        let ordering = compare_values(a.field(key), b.field(key));
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    })
}

/// Compare two possibly absent field values
#[must_use]
pub fn compare_values(a: Option<&FieldValue>, b: Option<&FieldValue>) -> Ordering {
    match (a.and_then(FieldValue::as_number), b.and_then(FieldValue::as_number)) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => collate::compare(&stringify(a), &stringify(b)),
    }
}

fn stringify(value: Option<&FieldValue>) -> String {
    value.map(FieldValue::to_display_string).unwrap_or_default()
}

// Columns mixing numbers and text make the comparator intransitive, which
// `slice::sort_by` may panic on. A plain merge sort tolerates it.
fn merge_sort<'a, F>(mut items: Vec<&'a Record>, cmp: &F) -> Vec<&'a Record>
where
    F: Fn(&Record, &Record) -> Ordering,
{
    if items.len() <= 1 {
        return items;
    }

    let right = items.split_off(items.len() / 2);
    let left = merge_sort(items, cmp);
    let right = merge_sort(right, cmp);

    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    while let (Some(a), Some(b)) = (left.peek(), right.peek()) {
        // Take from the right only when strictly smaller (stability)
        let next = if cmp(b, a) == Ordering::Less {
            right.next()
        } else {
            left.next()
        };
        merged.extend(next);
    }
    merged.extend(left);
    merged.extend(right);
    merged
}
