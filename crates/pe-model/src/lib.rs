//! Project Engine data model
//!
//! Records, column metadata, and the shared data set the dashboard derives
//! its views from.
//!
//! # Core Concepts
//!
//! - [`Record`]: an identified entity with an open-ended field mapping
//! - [`FieldValue`]: a single text, number, or boolean value
//! - [`ColumnDefinition`] / [`ColumnSet`]: displayable, sortable fields
//! - [`DataSet`]: a validated, cheaply shared record collection
//! - [`ViewConfig`]: mode, sort, group, search, and visible columns
//!
//! # Example
//!
//! ```rust
//! use pe_model::{seed, FieldValue};
//!
//! let data = seed::seed_data_set();
//! assert_eq!(data.len(), 8);
//!
//! let first = &data.records()[0];
//! assert_eq!(first.field("category"), Some(&FieldValue::from("Tech")));
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod column;
mod dataset;
mod error;
mod record;
mod value;
mod view_config;

pub mod seed;

pub use column::{ColumnDefinition, ColumnKey, ColumnSet, ColumnType, DEFAULT_AGGREGATE_FIELD};
pub use dataset::DataSet;
pub use error::ModelError;
pub use record::{Record, RecordId};
pub use value::FieldValue;
pub use view_config::{ParseEnumError, SortOrder, ViewConfig, ViewMode};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
