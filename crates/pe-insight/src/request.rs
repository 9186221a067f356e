//! Summarization request payload

use pe_model::DataSet;
use serde::Serialize;

/// System instruction sent with every request
pub const SYSTEM_INSTRUCTION: &str =
    "You are a professional data analyst. Provide actionable insights based on project data.";

/// Analysis prompt; the record JSON follows it directly
pub const PROMPT_PREFIX: &str = "Analyze this dataset and provide a concise summary (max 3 sentences) highlighting key trends, risks, and performance. Dataset: ";

/// Everything a [`Summarizer`](crate::Summarizer) needs for one call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightRequest {
    instruction: String,
    records: Vec<serde_json::Value>,
}

impl InsightRequest {
    /// Request describing `data`, with record ids stripped
    #[must_use]
    pub fn from_data_set(data: &DataSet) -> Self {
        Self {
            instruction: SYSTEM_INSTRUCTION.to_string(),
            records: data.iter().map(pe_model::Record::to_json_without_id).collect(),
        }
    }

    #[inline]
    #[must_use]
    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    /// Records as sent, one JSON object each
    #[inline]
    #[must_use]
    pub fn records(&self) -> &[serde_json::Value] {
        &self.records
    }

    /// Full user prompt: fixed text followed by compact record JSON
    #[must_use]
    pub fn prompt(&self) -> String {
        let dataset = serde_json::Value::Array(self.records.clone());
        format!("{PROMPT_PREFIX}{dataset}")
    }
}
