//! Error types for the view store

use pe_model::{ColumnKey, ModelError};

/// A rejected view mutation
///
/// The store's configuration is unchanged whenever one of these is returned.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ViewError {
    /// Key is not a syntactically valid column key
    #[error("invalid column key {key:?}: {reason}")]
    InvalidKey {
        /// The rejected input
        key: String,
        /// Why it failed to parse
        reason: String,
    },

    /// Key does not name a known column
    #[error("unknown column: {0}")]
    UnknownColumn(ColumnKey),

    /// Column exists but cannot be sorted on
    #[error("column is not sortable: {0}")]
    NotSortable(ColumnKey),

    /// Same column listed twice in the visible set
    #[error("column listed more than once: {0}")]
    DuplicateColumn(ColumnKey),
}

impl ViewError {
    pub(crate) fn invalid_key(key: &str, err: &ModelError) -> Self {
        Self::InvalidKey {
            key: key.to_string(),
            reason: err.to_string(),
        }
    }

    /// The column key the error refers to, if it parsed
    #[must_use]
    pub fn column(&self) -> Option<&ColumnKey> {
        match self {
            Self::InvalidKey { .. } => None,
            Self::UnknownColumn(key) | Self::NotSortable(key) | Self::DuplicateColumn(key) => {
                Some(key)
            }
        }
    }
}
