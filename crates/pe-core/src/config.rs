//! Dashboard configuration
//!
//! Loaded from TOML:
//!
//! ```toml
//! [insight]
//! enabled = true
//! model = "gemini-3-flash-preview"
//! api_key_env = "API_KEY"
//! timeout_secs = 30
//!
//! [view]
//! mode = "table"
//! sort_by = "budget"
//! sort_order = "desc"
//! group_by = "category"
//! aggregate_field = "budget"
//! ```
//!
//! Every key is optional.

use crate::error::ConfigError;
use pe_insight::{DEFAULT_API_KEY_ENV, DEFAULT_ENDPOINT, DEFAULT_MODEL, DEFAULT_TIMEOUT};
use pe_model::{SortOrder, ViewMode, DEFAULT_AGGREGATE_FIELD};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// Insight service settings
    pub insight: InsightSettings,
    /// Initial view settings
    pub view: ViewSettings,
}

impl DashboardConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded dashboard configuration");
        Ok(config)
    }

    /// Serialize back to TOML
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.insight.timeout_secs == 0 {
            return Err(ConfigError::Invalid("insight.timeout_secs must be positive".into()));
        }
        if self.insight.model.trim().is_empty() {
            return Err(ConfigError::Invalid("insight.model must not be empty".into()));
        }
        Ok(())
    }

    /// With insight service enabled or disabled
    #[inline]
    #[must_use]
    pub fn with_insights_enabled(mut self, enabled: bool) -> Self {
        self.insight.enabled = enabled;
        self
    }

    /// With model name
    #[inline]
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.insight.model = model.into();
        self
    }

    /// With request timeout in seconds
    #[inline]
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.insight.timeout_secs = secs;
        self
    }

    /// With initial display mode
    #[inline]
    #[must_use]
    pub fn with_mode(mut self, mode: ViewMode) -> Self {
        self.view.mode = mode;
        self
    }

    /// With initial sort
    #[inline]
    #[must_use]
    pub fn with_sort(mut self, key: Option<String>, order: SortOrder) -> Self {
        self.view.sort_by = key;
        self.view.sort_order = order;
        self
    }

    /// With initial group column
    #[inline]
    #[must_use]
    pub fn with_group(mut self, key: Option<String>) -> Self {
        self.view.group_by = key;
        self
    }
}

/// `[insight]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InsightSettings {
    /// Whether to call the service at all
    pub enabled: bool,
    /// Model name
    pub model: String,
    /// API base URL
    pub endpoint: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl InsightSettings {
    #[inline]
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for InsightSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

/// `[view]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewSettings {
    /// Table or list
    pub mode: ViewMode,
    /// Column to sort by
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    /// Sort direction
    pub sort_order: SortOrder,
    /// Column to group by
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_by: Option<String>,
    /// Numeric field summed per group
    pub aggregate_field: String,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            mode: ViewMode::Table,
            sort_by: None,
            sort_order: SortOrder::Asc,
            group_by: None,
            aggregate_field: DEFAULT_AGGREGATE_FIELD.to_string(),
        }
    }
}
