//! Project Engine insight fetcher
//!
//! Produces a short narrative summary of the current data set through an
//! external text-generation service, exposed as a tri-state value:
//! loading, ready with text, or failed with a fixed fallback message.
//!
//! - [`Summarizer`] is the service boundary; [`GeminiSummarizer`] is the
//!   production implementation
//! - [`InsightFetcher`] runs one request per data set and discards
//!   responses superseded by a newer trigger
//!
//! Raw service errors are logged and never shown.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use pe_insight::{GeminiSummarizer, InsightFetcher};
//!
//! # async fn example() {
//! let fetcher = InsightFetcher::new(Arc::new(GeminiSummarizer::from_env("API_KEY")));
//! fetcher.trigger(&pe_model::seed::seed_data_set());
//! println!("{}", fetcher.settled().await.display_text());
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod error;
mod fetcher;
mod gemini;
mod request;
mod state;
mod summarizer;

pub use error::{InsightError, StateMachineError};
pub use fetcher::{InsightFetcher, InsightStatus, DEFAULT_TIMEOUT};
pub use gemini::{GeminiSummarizer, DEFAULT_API_KEY_ENV, DEFAULT_ENDPOINT, DEFAULT_MODEL};
pub use request::{InsightRequest, PROMPT_PREFIX, SYSTEM_INSTRUCTION};
pub use state::{
    allowed_transitions, validate_transition, InsightPhase, InsightState, FALLBACK_MESSAGE,
    PLACEHOLDER,
};
pub use summarizer::Summarizer;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
