//! Project Engine view store
//!
//! Holds the dashboard's [`ViewConfig`](pe_model::ViewConfig) and applies
//! user-driven changes to it: layout mode, search text, sort column and
//! direction, group column, and visible columns.
//!
//! Column references are validated against the known
//! [`ColumnSet`](pe_model::ColumnSet). A rejected change returns a
//! [`ViewError`] and the previous configuration stays in place.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use pe_model::{seed, SortOrder};
//! use pe_view::ViewStore;
//!
//! let mut store = ViewStore::new(Arc::new(seed::seed_columns()));
//! store.set_sort_by("budget", SortOrder::Desc).unwrap();
//! assert!(store.set_sort_by("owner", SortOrder::Asc).is_err());
//! assert_eq!(store.config().sort_by().map(|k| k.as_str()), Some("budget"));
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod error;
mod store;

pub use error::ViewError;
pub use store::ViewStore;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
