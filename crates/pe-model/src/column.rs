//! Column metadata
//!
//! Provides [`ColumnKey`], [`ColumnDefinition`], and the validated
//! [`ColumnSet`] that view configuration is checked against.

use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Field whose numeric values are summed per group unless overridden
pub const DEFAULT_AGGREGATE_FIELD: &str = "budget";

/// Key naming a record field
///
/// Any non-empty name without control characters (`dueDate`, `due-date`,
/// `Due Date`), matching whatever field names records carry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ColumnKey(String);

impl ColumnKey {
    /// Key as a string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Key known to be valid at compile time
    pub(crate) fn from_static(s: &'static str) -> Self {
        debug_assert!(Self::validate(s).is_ok(), "invalid static key {s}");
        Self(s.to_string())
    }

    fn validate(s: &str) -> Result<(), ModelError> {
        if s.is_empty() {
            Err(ModelError::EmptyColumnKey)
        } else if s.contains(char::is_control) {
            Err(ModelError::InvalidColumnKey(s.to_string()))
        } else {
            Ok(())
        }
    }
}

impl Display for ColumnKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ColumnKey {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::validate(s)?;
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for ColumnKey {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::validate(&value)?;
        Ok(Self(value))
    }
}

impl From<ColumnKey> for String {
    fn from(key: ColumnKey) -> Self {
        key.0
    }
}

impl AsRef<str> for ColumnKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Semantic type tag; drives presentation only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    String,
    Number,
    Date,
    Boolean,
    Currency,
    Status,
}

impl Display for ColumnType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Date => "date",
            Self::Boolean => "boolean",
            Self::Currency => "currency",
            Self::Status => "status",
        };
        f.write_str(name)
    }
}

/// One displayable field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    key: ColumnKey,
    label: String,
    #[serde(rename = "type")]
    column_type: ColumnType,
    #[serde(rename = "isSortable", default)]
    sortable: bool,
}

impl ColumnDefinition {
    /// Create a sortable column definition
    #[inline]
    #[must_use]
    pub fn new(key: ColumnKey, label: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            key,
            label: label.into(),
            column_type,
            sortable: true,
        }
    }

    /// Mark the column as not sortable
    #[inline]
    #[must_use]
    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    /// Field key
    #[inline]
    #[must_use]
    pub fn key(&self) -> &ColumnKey {
        &self.key
    }

    /// Human-readable label
    #[inline]
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Semantic type tag
    #[inline]
    #[must_use]
    pub fn column_type(&self) -> ColumnType {
        self.column_type
    }

    /// Whether the column may be used as a sort key
    #[inline]
    #[must_use]
    pub fn is_sortable(&self) -> bool {
        self.sortable
    }
}

/// Ordered set of column definitions with unique keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSet {
    columns: Vec<ColumnDefinition>,
    aggregate_key: String,
}

impl ColumnSet {
    /// Build a column set
    ///
    /// # Errors
    /// - `ModelError::DuplicateColumn` if two definitions share a key
    pub fn new(columns: Vec<ColumnDefinition>) -> Result<Self, ModelError> {
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.key.as_str()) {
                return Err(ModelError::DuplicateColumn(column.key.to_string()));
            }
        }
        Ok(Self {
            columns,
            aggregate_key: DEFAULT_AGGREGATE_FIELD.to_string(),
        })
    }

    pub(crate) fn from_trusted(columns: Vec<ColumnDefinition>) -> Self {
        Self {
            columns,
            aggregate_key: DEFAULT_AGGREGATE_FIELD.to_string(),
        }
    }

    /// Parse column definitions from a JSON array
    ///
    /// # Errors
    /// Returns error on malformed JSON or duplicate keys
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let columns: Vec<ColumnDefinition> = serde_json::from_str(json)?;
        Self::new(columns)
    }

    /// Use a different field for bucket sums
    #[inline]
    #[must_use]
    pub fn with_aggregate(mut self, key: impl Into<String>) -> Self {
        self.aggregate_key = key.into();
        self
    }

    /// Field summed per bucket when grouping
    #[inline]
    #[must_use]
    pub fn aggregate_key(&self) -> &str {
        &self.aggregate_key
    }

    /// Look up a column by key
    #[inline]
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ColumnDefinition> {
        self.columns.iter().find(|c| c.key.as_str() == key)
    }

    /// Check if a column exists
    #[inline]
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Check if a column exists and is sortable
    #[inline]
    #[must_use]
    pub fn is_sortable(&self, key: &str) -> bool {
        self.get(key).is_some_and(ColumnDefinition::is_sortable)
    }

    /// Iterate over definitions in order
    pub fn iter(&self) -> impl Iterator<Item = &ColumnDefinition> {
        self.columns.iter()
    }

    /// Column keys in order
    #[must_use]
    pub fn keys(&self) -> Vec<ColumnKey> {
        self.columns.iter().map(|c| c.key.clone()).collect()
    }

    /// Number of columns
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Check if there are no columns
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
