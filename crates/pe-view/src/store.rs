//! The view configuration store
//!
//! [`ViewStore`] owns the current [`ViewConfig`]. Each mutation builds a new
//! value and swaps it in whole; key-taking mutations are checked against the
//! store's [`ColumnSet`] first and leave the configuration untouched when
//! they fail.

use crate::error::ViewError;
use pe_model::{ColumnKey, ColumnSet, SortOrder, ViewConfig, ViewMode};
use std::collections::HashSet;
use std::sync::Arc;

/// Owner of the current view configuration
#[derive(Debug, Clone)]
pub struct ViewStore {
    config: Arc<ViewConfig>,
    columns: Arc<ColumnSet>,
    revision: u64,
}

impl ViewStore {
    /// Store with the default configuration, every column visible
    #[must_use]
    pub fn new(columns: Arc<ColumnSet>) -> Self {
        let config = ViewConfig::new(columns.keys());
        Self {
            config: Arc::new(config),
            columns,
            revision: 0,
        }
    }

    /// Store starting from `config`, validated against `columns`
    pub fn with_config(columns: Arc<ColumnSet>, config: ViewConfig) -> Result<Self, ViewError> {
        let store = Self::new(columns);
        if let Some(key) = config.sort_by() {
            store.check_sortable(key)?;
        }
        if let Some(key) = config.group_by() {
            store.check_known(key)?;
        }
        store.check_visible(config.visible_columns())?;

        Ok(Self {
            config: Arc::new(config),
            ..store
        })
    }

    /// Current configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// Shared handle to the current configuration
    ///
    /// The handle keeps pointing at this value after later mutations.
    #[inline]
    #[must_use]
    pub fn snapshot(&self) -> Arc<ViewConfig> {
        Arc::clone(&self.config)
    }

    /// Columns the configuration is validated against
    #[inline]
    #[must_use]
    pub fn columns(&self) -> &ColumnSet {
        &self.columns
    }

    /// Number of committed changes so far
    #[inline]
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Switch between table and list layout
    pub fn set_mode(&mut self, mode: ViewMode) -> bool {
        let next = self.next().with_mode(mode);
        self.commit(next)
    }

    /// Replace the search query; any text is accepted
    pub fn set_search_query(&mut self, query: impl Into<String>) -> bool {
        let next = self.next().with_search(query);
        self.commit(next)
    }

    /// Set or clear the group-by column
    pub fn set_group_by(&mut self, key: Option<&str>) -> Result<bool, ViewError> {
        let key = key
            .map(|raw| -> Result<ColumnKey, ViewError> {
                let key = parse_key(raw)?;
                self.check_known(&key)?;
                Ok(key)
            })
            .transpose()
            .map_err(|err| rejected("group_by", err))?;

        let next = self.next().with_group(key);
        Ok(self.commit(next))
    }

    /// Sort by a column in the given direction
    pub fn set_sort_by(&mut self, key: &str, order: SortOrder) -> Result<bool, ViewError> {
        let key = self.sortable_key(key)?;
        let next = self.next().with_sort(Some(key), order);
        Ok(self.commit(next))
    }

    /// Drop the sort column, keeping the last direction
    pub fn clear_sort(&mut self) -> bool {
        let order = self.config.sort_order();
        let next = self.next().with_sort(None, order);
        self.commit(next)
    }

    /// Change direction only
    pub fn set_sort_order(&mut self, order: SortOrder) -> bool {
        let key = self.config.sort_by().cloned();
        let next = self.next().with_sort(key, order);
        self.commit(next)
    }

    /// Header-click behaviour
    ///
    /// Clicking the current sort column flips the direction; clicking any
    /// other column sorts by it ascending.
    pub fn toggle_sort(&mut self, key: &str) -> Result<bool, ViewError> {
        let key = self.sortable_key(key)?;
        let order = if self.config.sort_by() == Some(&key) {
            self.config.sort_order().flipped()
        } else {
            SortOrder::Asc
        };
        let next = self.next().with_sort(Some(key), order);
        Ok(self.commit(next))
    }

    /// Choose which columns are displayed, in order
    pub fn set_visible_columns<I, S>(&mut self, keys: I) -> Result<bool, ViewError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parsed = keys
            .into_iter()
            .map(|raw| parse_key(raw.as_ref()))
            .collect::<Result<Vec<_>, _>>()
            .and_then(|parsed| self.check_visible(&parsed).map(|()| parsed))
            .map_err(|err| rejected("visible_columns", err))?;

        let next = self.next().with_visible_columns(parsed);
        Ok(self.commit(next))
    }

    fn next(&self) -> ViewConfig {
        ViewConfig::clone(&self.config)
    }

    /// Swap in `next` if it differs; returns whether anything changed
    fn commit(&mut self, next: ViewConfig) -> bool {
        if *self.config == next {
            return false;
        }
        self.config = Arc::new(next);
        self.revision += 1;
        tracing::debug!(revision = self.revision, "view configuration updated");
        true
    }

    fn sortable_key(&self, raw: &str) -> Result<ColumnKey, ViewError> {
        let key = parse_key(raw).map_err(|err| rejected("sort_by", err))?;
        self.check_sortable(&key).map_err(|err| rejected("sort_by", err))?;
        Ok(key)
    }

    fn check_known(&self, key: &ColumnKey) -> Result<(), ViewError> {
        if self.columns.contains(key.as_str()) {
            Ok(())
        } else {
            Err(ViewError::UnknownColumn(key.clone()))
        }
    }

    fn check_sortable(&self, key: &ColumnKey) -> Result<(), ViewError> {
        self.check_known(key)?;
        if self.columns.is_sortable(key.as_str()) {
            Ok(())
        } else {
            Err(ViewError::NotSortable(key.clone()))
        }
    }

    fn check_visible(&self, keys: &[ColumnKey]) -> Result<(), ViewError> {
        let mut seen = HashSet::with_capacity(keys.len());
        for key in keys {
            self.check_known(key)?;
            if !seen.insert(key) {
                return Err(ViewError::DuplicateColumn(key.clone()));
            }
        }
        Ok(())
    }
}

fn parse_key(raw: &str) -> Result<ColumnKey, ViewError> {
    raw.parse().map_err(|err| ViewError::invalid_key(raw, &err))
}

fn rejected(field: &str, err: ViewError) -> ViewError {
    tracing::warn!(
        field,
        column = err.column().map(ColumnKey::as_str),
        error = %err,
        "view change rejected"
    );
    err
}
