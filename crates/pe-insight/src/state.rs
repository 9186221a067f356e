//! Insight lifecycle
//!
//! `Idle -> Loading -> Ready | Failed`, and any state back to `Loading` when
//! a new data set arrives. Nothing ever returns to `Idle`.

use crate::error::StateMachineError;
use serde::Serialize;
use std::fmt::{self, Display, Formatter};

/// Text shown while no insight has been produced yet
pub const PLACEHOLDER: &str = "Analyzing data patterns...";

/// Fixed user-facing text for any failure
pub const FALLBACK_MESSAGE: &str = "Insights unavailable.";

/// Phase of the insight lifecycle, without payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightPhase {
    Idle,
    Loading,
    Ready,
    Failed,
}

impl Display for InsightPhase {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Ready => "ready",
            Self::Failed => "failed",
        })
    }
}

/// Current insight as seen by the display layer
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "phase", content = "text", rename_all = "lowercase")]
pub enum InsightState {
    /// Nothing requested yet
    #[default]
    Idle,
    /// A request is outstanding
    Loading,
    /// Summary text for the latest data set
    Ready(String),
    /// Last request failed; carries the fallback message
    Failed(String),
}

impl InsightState {
    /// Failed state with the standard fallback text
    #[inline]
    #[must_use]
    pub fn failed() -> Self {
        Self::Failed(FALLBACK_MESSAGE.to_string())
    }

    #[inline]
    #[must_use]
    pub fn phase(&self) -> InsightPhase {
        match self {
            Self::Idle => InsightPhase::Idle,
            Self::Loading => InsightPhase::Loading,
            Self::Ready(_) => InsightPhase::Ready,
            Self::Failed(_) => InsightPhase::Failed,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Summary or fallback text, if any
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Ready(text) | Self::Failed(text) => Some(text),
            Self::Idle | Self::Loading => None,
        }
    }

    /// Text for an insight card, falling back to [`PLACEHOLDER`]
    #[must_use]
    pub fn display_text(&self) -> &str {
        self.text().unwrap_or(PLACEHOLDER)
    }
}

/// Validates a phase transition
pub fn validate_transition(from: InsightPhase, to: InsightPhase) -> Result<(), StateMachineError> {
    if allowed_transitions(from).contains(&to) {
        Ok(())
    } else {
        Err(StateMachineError::IllegalTransition { from, to })
    }
}

/// Phases reachable in one step from `from`
#[must_use]
pub fn allowed_transitions(from: InsightPhase) -> Vec<InsightPhase> {
    use InsightPhase::{Failed, Idle, Loading, Ready};
    match from {
        Idle => vec![Loading],
        Loading => vec![Loading, Ready, Failed],
        Ready | Failed => vec![Loading],
    }
}
