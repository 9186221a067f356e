//! View configuration values
//!
//! [`ViewConfig`] is a plain value. Every `with_*` method returns a new
//! configuration; validation against a column set happens in the store that
//! owns the current value.

use crate::column::ColumnKey;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Layout used to present records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Rows and columns
    #[default]
    Table,
    /// One card per record
    List,
}

impl Display for ViewMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Table => "table",
            Self::List => "list",
        })
    }
}

impl FromStr for ViewMode {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "list" => Ok(Self::List),
            _ => Err(ParseEnumError {
                kind: "view mode",
                value: s.to_string(),
            }),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Smallest first
    #[default]
    Asc,
    /// Largest first
    Desc,
}

impl SortOrder {
    /// The opposite direction
    #[inline]
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

impl Display for SortOrder {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        })
    }
}

impl FromStr for SortOrder {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Asc),
            "desc" | "descending" => Ok(Self::Desc),
            _ => Err(ParseEnumError {
                kind: "sort order",
                value: s.to_string(),
            }),
        }
    }
}

/// Unrecognized mode or order name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

/// Current presentation state
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewConfig {
    mode: ViewMode,
    sort_by: Option<ColumnKey>,
    sort_order: SortOrder,
    group_by: Option<ColumnKey>,
    search_query: String,
    visible_columns: Vec<ColumnKey>,
}

impl ViewConfig {
    /// Configuration showing the given columns, everything else default
    #[inline]
    #[must_use]
    pub fn new(visible_columns: Vec<ColumnKey>) -> Self {
        Self {
            visible_columns,
            ..Self::default()
        }
    }

    #[inline]
    #[must_use]
    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    #[inline]
    #[must_use]
    pub fn sort_by(&self) -> Option<&ColumnKey> {
        self.sort_by.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    #[inline]
    #[must_use]
    pub fn group_by(&self) -> Option<&ColumnKey> {
        self.group_by.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    #[inline]
    #[must_use]
    pub fn visible_columns(&self) -> &[ColumnKey] {
        &self.visible_columns
    }

    /// With display mode
    #[inline]
    #[must_use]
    pub fn with_mode(mut self, mode: ViewMode) -> Self {
        self.mode = mode;
        self
    }

    /// With sort key and order; `None` clears the key and keeps the order
    #[inline]
    #[must_use]
    pub fn with_sort(mut self, key: Option<ColumnKey>, order: SortOrder) -> Self {
        self.sort_by = key;
        self.sort_order = order;
        self
    }

    /// With group key
    #[inline]
    #[must_use]
    pub fn with_group(mut self, key: Option<ColumnKey>) -> Self {
        self.group_by = key;
        self
    }

    /// With search query (kept verbatim)
    #[inline]
    #[must_use]
    pub fn with_search(mut self, query: impl Into<String>) -> Self {
        self.search_query = query.into();
        self
    }

    /// With visible columns
    #[inline]
    #[must_use]
    pub fn with_visible_columns(mut self, keys: Vec<ColumnKey>) -> Self {
        self.visible_columns = keys;
        self
    }
}
