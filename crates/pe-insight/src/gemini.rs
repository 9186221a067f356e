//! Gemini `generateContent` client

use crate::error::InsightError;
use crate::request::InsightRequest;
use crate::summarizer::Summarizer;
use serde::{Deserialize, Serialize};

/// Default model name
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Default API base URL
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default environment variable holding the API key
pub const DEFAULT_API_KEY_ENV: &str = "API_KEY";

// Longest error body kept in an InsightError
const MAX_ERROR_BODY: usize = 512;

/// [`Summarizer`] backed by the Gemini REST API
#[derive(Debug, Clone)]
pub struct GeminiSummarizer {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    api_key_env: String,
}

impl GeminiSummarizer {
    /// Client with an explicit key (or none)
    #[must_use]
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: api_key.filter(|k| !k.is_empty()),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
        }
    }

    /// Client reading its key from the environment variable `var`
    ///
    /// A missing or empty variable is not an error here; each request will
    /// fail with [`InsightError::MissingApiKey`] instead.
    #[must_use]
    pub fn from_env(var: &str) -> Self {
        let key = std::env::var(var).ok();
        if key.as_deref().map_or(true, str::is_empty) {
            tracing::warn!(var, "no API key in environment; insights will be unavailable");
        }
        Self {
            api_key_env: var.to_string(),
            ..Self::new(key)
        }
    }

    /// With model name
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// With API base URL
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    #[inline]
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Full URL of the generate call
    #[must_use]
    pub fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

#[async_trait::async_trait]
impl Summarizer for GeminiSummarizer {
    async fn summarize(&self, request: &InsightRequest) -> Result<String, InsightError> {
        let key = self
            .api_key
            .as_deref()
            .ok_or_else(|| InsightError::MissingApiKey(self.api_key_env.clone()))?;

        tracing::debug!(model = %self.model, records = request.records().len(), "calling generateContent");

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", key)
            .json(&GenerateRequest::from(request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let mut body = response.text().await.unwrap_or_default();
            truncate(&mut body, MAX_ERROR_BODY);
            return Err(InsightError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: GenerateResponse = response.json().await?;
        body.text().ok_or(InsightError::EmptyResponse)
    }
}

fn truncate(s: &mut String, max: usize) {
    if s.len() > max {
        let mut end = max;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        s.truncate(end);
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    system_instruction: Content,
    contents: Vec<Content>,
}

impl From<&InsightRequest> for GenerateRequest {
    fn from(request: &InsightRequest) -> Self {
        Self {
            system_instruction: Content::text(None, request.instruction()),
            contents: vec![Content::text(Some("user"), request.prompt())],
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

impl Content {
    fn text(role: Option<&str>, text: impl Into<String>) -> Self {
        Self {
            role: role.map(str::to_string),
            parts: vec![Part {
                text: Some(text.into()),
            }],
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

impl GenerateResponse {
    /// Text parts of the first candidate, concatenated; `None` if blank
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::SYSTEM_INSTRUCTION;
    use pe_model::{DataSet, Record};
    use serde_json::json;

    fn request() -> InsightRequest {
        let data = DataSet::new(vec![Record::new(1).with_field("title", "A")]).unwrap();
        InsightRequest::from_data_set(&data)
    }

    #[test]
    fn url_joins_endpoint_and_model() {
        let summarizer = GeminiSummarizer::new(None).with_endpoint("http://localhost:9/v1/");
        assert_eq!(
            summarizer.url(),
            "http://localhost:9/v1/models/gemini-3-flash-preview:generateContent"
        );
    }

    #[test]
    fn request_body_shape() {
        let body = serde_json::to_value(GenerateRequest::from(&request())).unwrap();
        assert_eq!(body["systemInstruction"]["parts"][0]["text"], SYSTEM_INSTRUCTION);
        assert!(body["systemInstruction"].get("role").is_none());
        assert_eq!(body["contents"][0]["role"], "user");
        assert!(body["contents"][0]["parts"][0]["text"]
            .as_str()
            .unwrap()
            .ends_with("Dataset: [{\"title\":\"A\"}]"));
    }

    #[test]
    fn response_text_concatenates_parts() {
        let body: GenerateResponse = serde_json::from_value(json!({
            "candidates": [
                {"content": {"role": "model", "parts": [{"text": "Budgets "}, {"text": "are high."}]}},
                {"content": {"parts": [{"text": "ignored"}]}}
            ]
        }))
        .unwrap();
        assert_eq!(body.text().as_deref(), Some("Budgets are high."));
    }

    #[test]
    fn blank_or_missing_text_is_none() {
        let empty: GenerateResponse = serde_json::from_value(json!({})).unwrap();
        assert!(empty.text().is_none());

        let blank: GenerateResponse =
            serde_json::from_value(json!({"candidates": [{"content": {"parts": [{"text": "  "}]}}]}))
                .unwrap();
        assert!(blank.text().is_none());

        let blocked: GenerateResponse =
            serde_json::from_value(json!({"candidates": [{"finishReason": "SAFETY"}]})).unwrap();
        assert!(blocked.text().is_none());
    }

    #[tokio::test]
    async fn missing_key_fails_without_network() {
        let summarizer = GeminiSummarizer::new(Some(String::new()));
        assert!(!summarizer.has_api_key());

        let err = summarizer.summarize(&request()).await.unwrap_err();
        assert!(matches!(err, InsightError::MissingApiKey(ref var) if var == "API_KEY"));
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let mut s = "héllo".to_string();
        truncate(&mut s, 2);
        assert_eq!(s, "h");
    }
}
