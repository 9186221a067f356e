//! Shared record collections

use crate::error::ModelError;
use crate::record::Record;
use std::collections::HashSet;
use std::sync::Arc;

/// Immutable, validated record collection
///
/// Cloning shares the allocation. Identity ([`DataSet::same_as`]) is what
/// decides whether downstream consumers see a new data set.
#[derive(Debug, Clone)]
pub struct DataSet {
    records: Arc<[Record]>,
}

impl DataSet {
    /// Build a data set, checking id uniqueness
    ///
    /// # Errors
    /// - `ModelError::DuplicateId` if two records share an id
    pub fn new(records: Vec<Record>) -> Result<Self, ModelError> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id()) {
                return Err(ModelError::DuplicateId(record.id().clone()));
            }
        }
        Ok(Self {
            records: records.into(),
        })
    }

    pub(crate) fn from_trusted(records: Vec<Record>) -> Self {
        Self {
            records: records.into(),
        }
    }

    /// Empty data set
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self {
            records: Arc::from(Vec::new()),
        }
    }

    /// Parse a JSON array of records
    ///
    /// # Errors
    /// Returns error on malformed JSON, bad ids, or duplicate ids
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let records: Vec<Record> = serde_json::from_str(json)?;
        Self::new(records)
    }

    /// Records in source order
    #[inline]
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Iterate over records
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }

    /// Number of records
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if there are no records
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Check if both handles point at the same allocation
    #[inline]
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.records, &other.records)
    }
}

impl Default for DataSet {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RecordId;

    #[test]
    fn rejects_duplicate_ids() {
        let result = DataSet::new(vec![Record::new(1), Record::new(2), Record::new(1)]);
        assert!(matches!(result, Err(ModelError::DuplicateId(RecordId::Int(1)))));
    }

    #[test]
    fn int_and_text_ids_are_distinct() {
        let data = DataSet::new(vec![Record::new(1), Record::new("1")]).unwrap();
        assert_eq!(data.len(), 2);
    }

    #[test]
    fn identity_follows_allocation() {
        let a = DataSet::new(vec![Record::new(1)]).unwrap();
        let shared = a.clone();
        let rebuilt = DataSet::new(vec![Record::new(1)]).unwrap();

        assert!(a.same_as(&shared));
        assert!(!a.same_as(&rebuilt));
    }

    #[test]
    fn from_json_duplicate() {
        let result = DataSet::from_json(r#"[{"id": 1}, {"id": 1}]"#);
        assert!(matches!(result, Err(ModelError::DuplicateId(_))));
    }

    #[test]
    fn from_json_malformed() {
        assert!(matches!(DataSet::from_json("{"), Err(ModelError::Json(_))));
    }

    #[test]
    fn empty_default() {
        assert!(DataSet::default().is_empty());
    }
}
