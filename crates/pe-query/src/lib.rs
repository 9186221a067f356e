//! Project Engine query engine
//!
//! Pure, linear passes that turn the raw record set and the current
//! [`ViewConfig`] into a display-ready [`DisplayResult`]:
//!
//! 1. [`filter`]: case-insensitive substring match over every field
//! 2. [`sort`]: stable single-column sort, numeric or locale-style
//! 3. [`group`]: first-appearance buckets with `count` and `sum`
//!
//! The engine has no error path. Configuration is validated by the view
//! store before it gets here; missing fields are simply absent values.
//!
//! # Example
//!
//! ```rust
//! use pe_model::{seed, ViewConfig};
//!
//! let records = seed::seed_records();
//! let columns = seed::seed_columns();
//! let config = ViewConfig::new(columns.keys()).with_search("tech");
//!
//! let result = pe_query::derive(&records, &config, &columns);
//! assert_eq!(result.len(), 3);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod collate;
mod display;
mod filter;
mod group;
mod sort;

pub use display::DisplayResult;
pub use filter::{filter, matches};
pub use group::{group, Bucket, BucketStats};
pub use sort::{compare_values, sort};

use pe_model::{ColumnSet, Record, ViewConfig};

/// Filter, sort, then group `records` according to `config`
///
/// `columns` supplies the field summed per bucket.
#[must_use]
pub fn derive<'a>(
    records: &'a [Record],
    config: &ViewConfig,
    columns: &ColumnSet,
) -> DisplayResult<'a> {
    let filtered = filter(records, config.search_query());

    let sorted = match config.sort_by() {
        Some(key) => sort(filtered, key.as_str(), config.sort_order()),
        None => filtered,
    };

    let result = match config.group_by() {
        Some(key) => DisplayResult::Grouped(group(sorted, key.as_str(), columns.aggregate_key())),
        None => DisplayResult::Flat(sorted),
    };

    tracing::debug!(
        total = records.len(),
        shown = result.len(),
        grouped = config.group_by().is_some(),
        "derived view"
    );
    result
}
