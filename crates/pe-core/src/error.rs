//! Error types for the dashboard core

use pe_model::ModelError;
use pe_view::ViewError;
use std::path::PathBuf;

/// Main dashboard error type
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Initial view settings were rejected
    #[error("view error: {0}")]
    View(#[from] ViewError),

    /// Records or columns were malformed
    #[error("data error in {path}: {source}")]
    Data {
        /// File being read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: ModelError,
    },

    /// File could not be read
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file unreadable
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Not valid TOML, or wrong shape
    #[error("invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// Could not serialize
    #[error("cannot serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Value out of range
    #[error("invalid value: {0}")]
    Invalid(String),
}
