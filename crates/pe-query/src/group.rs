//! Grouping with per-bucket aggregates

use indexmap::IndexMap;
use pe_model::{FieldValue, Record};
use serde::Serialize;

/// Aggregate statistics for one bucket
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct BucketStats {
    /// Number of member records
    pub count: usize,
    /// Sum of the numeric aggregate field across members
    pub sum: f64,
}

/// Records sharing one group-key value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bucket<'a> {
    /// The exact field value, or `None` for records lacking the field
    pub value: Option<FieldValue>,
    /// Members in sorted order
    pub records: Vec<&'a Record>,
    /// Aggregates
    pub stats: BucketStats,
}

impl Bucket<'_> {
    /// Label shown in bucket headers
    #[must_use]
    pub fn label(&self) -> String {
        self.value
            .as_ref()
            .map_or_else(|| "(none)".to_string(), FieldValue::to_display_string)
    }
}

/// Hashable identity of a group value; numbers by bit pattern
#[derive(Debug, PartialEq, Eq, Hash)]
enum GroupKey {
    Absent,
    Bool(bool),
    Number(u64),
    Text(String),
}

impl GroupKey {
    fn of(value: Option<&FieldValue>) -> Self {
        match value {
            None => Self::Absent,
            Some(FieldValue::Bool(b)) => Self::Bool(*b),
            Some(FieldValue::Number(n)) => Self::Number(number_bits(*n)),
            Some(FieldValue::Text(s)) => Self::Text(s.clone()),
        }
    }
}

fn number_bits(n: f64) -> u64 {
    if n == 0.0 {
        0.0_f64.to_bits()
    } else if n.is_nan() {
        f64::NAN.to_bits()
    } else {
        n.to_bits()
    }
}

/// Partition records into buckets by the exact value of `key`
///
/// Buckets appear in order of first occurrence. Values are not normalized:
/// the number `5` and the text `"5"` land in different buckets. `sum`
/// totals numeric values of `aggregate_key`; anything else adds nothing.
#[must_use]
pub fn group<'a>(records: Vec<&'a Record>, key: &str, aggregate_key: &str) -> Vec<Bucket<'a>> {
    let mut buckets: IndexMap<GroupKey, Bucket<'a>> = IndexMap::new();

    for record in records {
        let value = record.field(key);
        let bucket = buckets.entry(GroupKey::of(value)).or_insert_with(|| Bucket {
            value: value.cloned(),
            records: Vec::new(),
            stats: BucketStats::default(),
        });

        bucket.records.push(record);
        bucket.stats.count += 1;
        if let Some(amount) = record.field(aggregate_key).and_then(FieldValue::as_number) {
            bucket.stats.sum += amount;
        }
    }

    buckets.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pe_model::seed;
    use pretty_assertions::assert_eq;

    #[test]
    fn seed_by_category() {
        let records = seed::seed_records();
        let buckets = group(records.iter().collect(), "category", "budget");

        let summary: Vec<_> = buckets
            .iter()
            .map(|b| (b.label(), b.stats.count, b.stats.sum))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("Tech".to_string(), 3, 49000.0),
                ("Marketing".to_string(), 3, 48000.0),
                ("Infrastructure".to_string(), 2, 57000.0),
            ]
        );
    }

    #[test]
    fn members_keep_input_order() {
        let records = seed::seed_records();
        let buckets = group(records.iter().collect(), "assignee", "budget");
        let alex: Vec<_> = buckets[0].records.iter().map(|r| r.id().to_string()).collect();
        assert_eq!(alex, vec!["1", "4", "7"]);
    }

    #[test]
    fn values_are_not_normalized() {
        let records = vec![
            Record::new(1).with_field("k", 5),
            Record::new(2).with_field("k", "5"),
            Record::new(3).with_field("k", 5),
        ];
        let buckets = group(records.iter().collect(), "k", "budget");
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].stats.count, 2);
        assert_eq!(buckets[1].value, Some(FieldValue::from("5")));
    }

    #[test]
    fn absent_group_values_share_a_bucket() {
        let records = vec![Record::new(1), Record::new(2).with_field("k", "x"), Record::new(3)];
        let buckets = group(records.iter().collect(), "k", "budget");
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].value, None);
        assert_eq!(buckets[0].label(), "(none)");
        assert_eq!(buckets[0].stats.count, 2);
    }

    #[test]
    fn non_numeric_budget_adds_nothing() {
        let records = vec![
            Record::new(1).with_field("k", "a").with_field("budget", 100),
            Record::new(2).with_field("k", "a").with_field("budget", "200"),
            Record::new(3).with_field("k", "a"),
        ];
        let buckets = group(records.iter().collect(), "k", "budget");
        assert_eq!(buckets[0].stats, BucketStats { count: 3, sum: 100.0 });
    }

    #[test]
    fn empty_input_has_no_buckets() {
        assert!(group(Vec::new(), "k", "budget").is_empty());
    }
}
