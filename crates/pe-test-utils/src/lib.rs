//! Testing utilities for the Project Engine workspace
//!
//! Shared fixtures and [`Summarizer`] doubles.

#![allow(missing_docs)]

use async_trait::async_trait;
use pe_insight::{InsightError, InsightRequest, Summarizer};
use pe_model::{seed, ColumnSet, DataSet, Record};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub fn seed_data_set() -> DataSet {
    seed::seed_data_set()
}

pub fn seed_columns() -> ColumnSet {
    seed::seed_columns()
}

/// Data set of `n` records with distinct titles and budgets
pub fn numbered_data_set(n: usize) -> DataSet {
    let records = (1..=n)
        .map(|i| {
            let id = i64::try_from(i).unwrap();
            Record::new(id)
                .with_field("title", format!("Project {i}"))
                .with_field("budget", id * 1000)
        })
        .collect();
    DataSet::new(records).unwrap()
}

/// Seed records serialized as a JSON array
pub fn seed_json() -> String {
    serde_json::to_string_pretty(seed::seed_data_set().records()).unwrap()
}

/// One scripted reply: wait `delay`, then answer
#[derive(Debug)]
pub struct Reply {
    pub delay: Duration,
    pub outcome: Result<String, String>,
}

impl Reply {
    pub fn ok(text: &str) -> Self {
        Self {
            delay: Duration::ZERO,
            outcome: Ok(text.to_string()),
        }
    }

    pub fn err(message: &str) -> Self {
        Self {
            delay: Duration::ZERO,
            outcome: Err(message.to_string()),
        }
    }

    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// Summarizer answering calls in order from a script
///
/// Also records the number of records seen by each call and how many calls
/// are still running.
#[derive(Debug, Default)]
pub struct ScriptedSummarizer {
    replies: Mutex<VecDeque<Reply>>,
    seen: Mutex<Vec<usize>>,
    calls: AtomicUsize,
    running: Arc<AtomicUsize>,
}

impl ScriptedSummarizer {
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Calls started and not yet finished or dropped
    pub fn running(&self) -> usize {
        self.running.load(Ordering::SeqCst)
    }

    /// Record counts of each request, in call order
    pub fn seen(&self) -> Vec<usize> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Summarizer for ScriptedSummarizer {
    async fn summarize(&self, request: &InsightRequest) -> Result<String, InsightError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let _running = Running::enter(&self.running);
        self.seen.lock().unwrap().push(request.records().len());
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Reply::err("script exhausted"));

        tokio::time::sleep(reply.delay).await;
        reply.outcome.map_err(InsightError::Transport)
    }
}

/// Counts a call as running until dropped
struct Running(Arc<AtomicUsize>);

impl Running {
    fn enter(counter: &Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(Arc::clone(counter))
    }
}

impl Drop for Running {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Summarizer that never answers
#[derive(Debug, Default)]
pub struct HangingSummarizer;

#[async_trait]
impl Summarizer for HangingSummarizer {
    async fn summarize(&self, _request: &InsightRequest) -> Result<String, InsightError> {
        std::future::pending().await
    }
}
