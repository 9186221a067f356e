//! Error types for insight fetching
//!
//! None of these reach the display layer. The fetcher logs them and shows
//! [`FALLBACK_MESSAGE`](crate::FALLBACK_MESSAGE) instead.

use crate::state::InsightPhase;
use std::time::Duration;

/// Failure of a single summarization request
#[derive(Debug, thiserror::Error)]
pub enum InsightError {
    /// No API key configured
    #[error("API key not set (expected in ${0})")]
    MissingApiKey(String),

    /// Request never produced a response
    #[error("transport error: {0}")]
    Transport(String),

    /// Service answered with a non-success status
    #[error("service returned {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, possibly truncated
        body: String,
    },

    /// Response body did not have the expected shape
    #[error("malformed response: {0}")]
    Malformed(String),

    /// Response contained no text
    #[error("empty response")]
    EmptyResponse,

    /// No response within the configured limit
    #[error("request timed out after {}s", .0.as_secs())]
    Timeout(Duration),
}

impl InsightError {
    /// Check if the service was reached at all
    #[inline]
    #[must_use]
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            Self::Status { .. } | Self::Malformed(_) | Self::EmptyResponse
        )
    }
}

impl From<reqwest::Error> for InsightError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Malformed(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// Insight state machine errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StateMachineError {
    /// Transition not permitted from the current phase
    #[error("illegal insight transition: {from} -> {to}")]
    IllegalTransition {
        /// Phase before
        from: InsightPhase,
        /// Requested phase
        to: InsightPhase,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_message_in_seconds() {
        let err = InsightError::Timeout(Duration::from_secs(30));
        assert_eq!(err.to_string(), "request timed out after 30s");
    }

    #[test]
    fn remote_classification() {
        assert!(InsightError::EmptyResponse.is_remote());
        assert!(!InsightError::MissingApiKey("API_KEY".into()).is_remote());
        assert!(!InsightError::Transport("refused".into()).is_remote());
    }

    #[test]
    fn missing_key_names_variable() {
        let err = InsightError::MissingApiKey("API_KEY".into());
        assert_eq!(err.to_string(), "API key not set (expected in $API_KEY)");
    }
}
