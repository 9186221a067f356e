//! The dashboard facade
//!
//! [`Dashboard`] ties the record set, the view store and the insight fetcher
//! together. Replacing the record set starts a new insight request; view
//! changes only change what [`Dashboard::display`] derives.

use crate::config::{DashboardConfig, ViewSettings};
use crate::error::DashboardError;
use pe_insight::{GeminiSummarizer, InsightFetcher, InsightState, Summarizer};
use pe_model::{ColumnSet, DataSet, ViewConfig};
use pe_query::DisplayResult;
use pe_view::{ViewError, ViewStore};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Records, view state and insights for one dashboard
#[derive(Debug)]
pub struct Dashboard {
    data: DataSet,
    view: ViewStore,
    insights: Option<InsightFetcher>,
}

impl Dashboard {
    /// Empty dashboard over `columns`, insights off
    #[must_use]
    pub fn new(columns: ColumnSet) -> Self {
        Self {
            data: DataSet::empty(),
            view: ViewStore::new(Arc::new(columns)),
            insights: None,
        }
    }

    /// Dashboard configured from `config`
    ///
    /// Uses the Gemini service when insights are enabled.
    pub fn from_config(config: &DashboardConfig, columns: ColumnSet) -> Result<Self, DashboardError> {
        let columns = columns.with_aggregate(config.view.aggregate_field.as_str());
        let mut dashboard = Self::new(columns);
        apply_view_settings(&mut dashboard.view, &config.view)?;

        if config.insight.enabled {
            let summarizer = GeminiSummarizer::from_env(&config.insight.api_key_env)
                .with_model(config.insight.model.as_str())
                .with_endpoint(config.insight.endpoint.as_str());
            dashboard = dashboard.with_summarizer(Arc::new(summarizer), config.insight.timeout());
        }
        Ok(dashboard)
    }

    /// With an insight backend
    #[must_use]
    pub fn with_summarizer(mut self, summarizer: Arc<dyn Summarizer>, timeout: Duration) -> Self {
        self.insights = Some(InsightFetcher::new(summarizer).with_timeout(timeout));
        self
    }

    /// Replace the record set
    ///
    /// Starts an insight request when the set is new and insights are on.
    /// Handing back the current set is a no-op. Requires a tokio runtime
    /// when insights are on.
    pub fn load(&mut self, data: DataSet) -> Option<JoinHandle<()>> {
        if data.same_as(&self.data) {
            tracing::debug!("same record set; nothing to refresh");
            return None;
        }
        tracing::info!(records = data.len(), "record set replaced");
        self.data = data;
        self.insights.as_ref().map(|fetcher| fetcher.trigger(&self.data))
    }

    #[inline]
    #[must_use]
    pub fn data(&self) -> &DataSet {
        &self.data
    }

    #[inline]
    #[must_use]
    pub fn columns(&self) -> &ColumnSet {
        self.view.columns()
    }

    #[inline]
    #[must_use]
    pub fn view(&self) -> &ViewStore {
        &self.view
    }

    /// Mutable view store; changes here never refetch insights
    #[inline]
    pub fn view_mut(&mut self) -> &mut ViewStore {
        &mut self.view
    }

    #[inline]
    #[must_use]
    pub fn insights(&self) -> Option<&InsightFetcher> {
        self.insights.as_ref()
    }

    /// Current insight, `Idle` when insights are off
    #[must_use]
    pub fn insight_state(&self) -> InsightState {
        self.insights
            .as_ref()
            .map_or(InsightState::Idle, InsightFetcher::state)
    }

    /// Records as currently filtered, sorted and grouped
    #[must_use]
    pub fn display(&self) -> DisplayResult<'_> {
        pe_query::derive(self.data.records(), self.view.config(), self.view.columns())
    }

    /// Everything a renderer needs, in one value
    #[must_use]
    pub fn snapshot(&self) -> DashboardSnapshot<'_> {
        DashboardSnapshot {
            revision: self.view.revision(),
            total_records: self.data.len(),
            config: self.view.config(),
            result: self.display(),
            insight: self.insight_state(),
        }
    }
}

/// Apply `[view]` settings to a store
pub fn apply_view_settings(store: &mut ViewStore, settings: &ViewSettings) -> Result<(), ViewError> {
    store.set_mode(settings.mode);
    match settings.sort_by.as_deref() {
        Some(key) => {
            store.set_sort_by(key, settings.sort_order)?;
        }
        None => {
            store.set_sort_order(settings.sort_order);
        }
    }
    store.set_group_by(settings.group_by.as_deref())?;
    Ok(())
}

/// Presentation-ready view of a [`Dashboard`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot<'a> {
    /// View store revision the snapshot was taken at
    pub revision: u64,
    /// Records before filtering
    pub total_records: usize,
    /// View configuration
    pub config: &'a ViewConfig,
    /// Derived records
    pub result: DisplayResult<'a>,
    /// Insight state
    pub insight: InsightState,
}
