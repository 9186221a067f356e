//! Project Engine core
//!
//! One [`Dashboard`] value holding:
//! - the current record set
//! - the view configuration store
//! - the insight fetcher for the record set
//!
//! plus TOML configuration ([`DashboardConfig`]) and JSON file loading.
//!
//! # Example
//!
//! ```rust
//! use pe_core::prelude::*;
//!
//! let mut dashboard = Dashboard::new(pe_model::seed::seed_columns());
//! dashboard.load(pe_model::seed::seed_data_set());
//! dashboard.view_mut().set_group_by(Some("category")).unwrap();
//!
//! let snapshot = dashboard.snapshot();
//! assert_eq!(snapshot.result.buckets().map(|b| b.len()), Some(3));
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod config;
pub mod dashboard;
pub mod error;
pub mod source;

pub use config::{DashboardConfig, InsightSettings, ViewSettings};
pub use dashboard::{apply_view_settings, Dashboard, DashboardSnapshot};
pub use error::{ConfigError, DashboardError};
pub use source::{read_columns, read_data_set};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the dashboard core
    pub use crate::{Dashboard, DashboardConfig, DashboardError, DashboardSnapshot};
    pub use pe_insight::{InsightState, Summarizer};
    pub use pe_model::{ColumnSet, DataSet, Record, SortOrder, ViewMode};
    pub use pe_query::DisplayResult;
    pub use pe_view::ViewError;
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod integration_tests {
    use super::prelude::*;
    use pe_model::seed;

    #[test]
    fn invalid_sort_keeps_display_unchanged() {
        let mut dashboard = Dashboard::new(seed::seed_columns());
        dashboard.load(seed::seed_data_set());
        dashboard.view_mut().set_sort_by("budget", SortOrder::Asc).unwrap();

        let before: Vec<_> = dashboard.display().records().iter().map(|r| r.id().clone()).collect();
        assert!(dashboard.view_mut().set_sort_by("nope", SortOrder::Desc).is_err());
        let after: Vec<_> = dashboard.display().records().iter().map(|r| r.id().clone()).collect();

        assert_eq!(before, after);
    }
}
