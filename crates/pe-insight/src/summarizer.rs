//! Summarization boundary

use crate::error::InsightError;
use crate::request::InsightRequest;

/// External text-generation service
///
/// Implement this trait to plug a different backend into the fetcher.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait Summarizer: Send + Sync {
    /// Produce a short narrative summary for the request
    async fn summarize(&self, request: &InsightRequest) -> Result<String, InsightError>;
}
