//! Error types for the data model

use crate::record::RecordId;

/// Data model errors
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// Two records share an id
    #[error("duplicate record id: {0}")]
    DuplicateId(RecordId),

    /// Record has no id
    #[error("record is missing an id")]
    MissingId,

    /// Id is neither a string nor an integer
    #[error("invalid record id: {0} (must be a string or integer)")]
    InvalidId(String),

    /// Two columns share a key
    #[error("duplicate column key: {0}")]
    DuplicateColumn(String),

    /// Empty column key
    #[error("column key is empty")]
    EmptyColumnKey,

    /// Column key containing control characters
    #[error("invalid column key: {0:?} (control characters are not allowed)")]
    InvalidColumnKey(String),

    /// Data set JSON could not be parsed
    #[error("malformed data set: {0}")]
    Json(#[from] serde_json::Error),
}
