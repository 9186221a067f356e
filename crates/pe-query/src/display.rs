//! Derived, display-ready results

use crate::group::Bucket;
use pe_model::Record;
use serde::Serialize;

/// Output of [`crate::derive`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "items", rename_all = "lowercase")]
pub enum DisplayResult<'a> {
    /// Ungrouped records in display order
    Flat(Vec<&'a Record>),
    /// Buckets in first-appearance order
    Grouped(Vec<Bucket<'a>>),
}

impl<'a> DisplayResult<'a> {
    /// Number of records shown, across all buckets
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Flat(records) => records.len(),
            Self::Grouped(buckets) => buckets.iter().map(|b| b.records.len()).sum(),
        }
    }

    /// Check if nothing matched
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All records in display order, buckets flattened
    #[must_use]
    pub fn records(&self) -> Vec<&'a Record> {
        match self {
            Self::Flat(records) => records.clone(),
            Self::Grouped(buckets) => buckets
                .iter()
                .flat_map(|b| b.records.iter().copied())
                .collect(),
        }
    }

    /// Buckets, if grouped
    #[inline]
    #[must_use]
    pub fn buckets(&self) -> Option<&[Bucket<'a>]> {
        match self {
            Self::Flat(_) => None,
            Self::Grouped(buckets) => Some(buckets),
        }
    }
}
