//! Generation-tagged insight fetching
//!
//! Every [`InsightFetcher::trigger`] bumps a request generation, cancels the
//! request still in flight and starts one new request. A completion is
//! applied only if its generation is still the newest, so a slow response
//! for an old data set can never replace the result (or the loading state)
//! of a newer one, even when it finishes before the cancellation lands.

use crate::request::InsightRequest;
use crate::state::{validate_transition, InsightPhase, InsightState};
use crate::summarizer::Summarizer;
use crate::InsightError;
use parking_lot::Mutex;
use pe_model::DataSet;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::{AbortHandle, JoinHandle};

/// Time allowed for one summarization request
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Insight state together with the generation that produced it
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct InsightStatus {
    generation: u64,
    state: InsightState,
}

impl InsightStatus {
    /// Number of requests started so far; `0` before the first trigger
    #[inline]
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> &InsightState {
        &self.state
    }
}

/// Runs summarization requests and tracks the latest result
///
/// Cloning yields another handle to the same state.
#[derive(Clone)]
pub struct InsightFetcher {
    summarizer: Arc<dyn Summarizer>,
    status: Arc<watch::Sender<InsightStatus>>,
    in_flight: Arc<Mutex<Option<AbortHandle>>>,
    timeout: Duration,
}

impl std::fmt::Debug for InsightFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InsightFetcher")
            .field("status", &*self.status.borrow())
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl InsightFetcher {
    /// Fetcher in the idle state
    #[must_use]
    pub fn new(summarizer: Arc<dyn Summarizer>) -> Self {
        let (status, _) = watch::channel(InsightStatus::default());
        Self {
            summarizer,
            status: Arc::new(status),
            in_flight: Arc::new(Mutex::new(None)),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// With request timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[inline]
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Snapshot of the current state
    #[must_use]
    pub fn state(&self) -> InsightState {
        self.status.borrow().state.clone()
    }

    /// Snapshot of state and generation
    #[must_use]
    pub fn status(&self) -> InsightStatus {
        self.status.borrow().clone()
    }

    /// Receiver notified on every state change
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<InsightStatus> {
        self.status.subscribe()
    }

    /// Wait until the current request has resolved
    ///
    /// Returns immediately when nothing is loading. If a newer trigger
    /// arrives while waiting, waits for that one instead.
    pub async fn settled(&self) -> InsightState {
        let mut rx = self.subscribe();
        let state = match rx.wait_for(|s| !s.state.is_loading()).await {
            Ok(status) => status.state.clone(),
            // Unreachable while `self` holds the sender
            Err(_) => self.state(),
        };
        state
    }

    /// Start a request for `data`, cancelling any outstanding one
    ///
    /// Moves to `Loading` before returning. Must be called within a tokio
    /// runtime. The returned handle resolves once the response has been
    /// applied or discarded, or with a cancelled [`tokio::task::JoinError`]
    /// when a later trigger supersedes it.
    pub fn trigger(&self, data: &DataSet) -> JoinHandle<()> {
        let request = InsightRequest::from_data_set(data);

        // Held until the new handle is stored so generations and handles
        // are swapped in the same order
        let mut in_flight = self.in_flight.lock();

        let mut generation = 0;
        self.status.send_modify(|status| {
            if let Err(err) = validate_transition(status.state.phase(), InsightPhase::Loading) {
                tracing::warn!(error = %err, "unexpected insight transition");
            }
            status.generation += 1;
            status.state = InsightState::Loading;
            generation = status.generation;
        });
        tracing::info!(generation, records = data.len(), "requesting insights");

        let summarizer = Arc::clone(&self.summarizer);
        let status = Arc::clone(&self.status);
        let timeout = self.timeout;

        let handle = tokio::spawn(async move {
            let next = match fetch(summarizer.as_ref(), &request, timeout).await {
                Ok(text) => InsightState::Ready(text),
                Err(err) => {
                    tracing::error!(
                        generation,
                        remote = err.is_remote(),
                        error = %err,
                        "insight request failed"
                    );
                    InsightState::failed()
                }
            };
            apply(&status, generation, next);
        });

        if let Some(previous) = in_flight.replace(handle.abort_handle()) {
            if !previous.is_finished() {
                previous.abort();
                tracing::debug!(superseded_by = generation, "cancelled insight request");
            }
        }
        handle
    }
}

async fn fetch(
    summarizer: &dyn Summarizer,
    request: &InsightRequest,
    timeout: Duration,
) -> Result<String, InsightError> {
    match tokio::time::timeout(timeout, summarizer.summarize(request)).await {
        Ok(Ok(text)) if text.trim().is_empty() => Err(InsightError::EmptyResponse),
        Ok(result) => result,
        Err(_) => Err(InsightError::Timeout(timeout)),
    }
}

/// Store `next` if `generation` is still current
fn apply(status: &watch::Sender<InsightStatus>, generation: u64, next: InsightState) -> bool {
    let applied = status.send_if_modified(|current| {
        if current.generation != generation {
            return false;
        }
        if let Err(err) = validate_transition(current.state.phase(), next.phase()) {
            tracing::warn!(generation, error = %err, "dropping insight result");
            return false;
        }
        current.state = next;
        true
    });

    if applied {
        tracing::debug!(generation, "insight result applied");
    } else {
        tracing::debug!(generation, "discarding stale insight result");
    }
    applied
}
