//! Utilities for querying Gemini via the Generative Language `generateContent` endpoint.
//!
//! For specific details on request/response schemas, see the [Gemini API docs](https://ai.google.dev/api/generate-content).

use std::{env, fmt, time::Duration};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cli::{API_KEY_ENV, DEFAULT_MODEL, GEMINI_API_BASE};
use crate::errors::GemError;

/// The Gemini API key. Never printed, not even in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Read the key from `GEMINI_API_KEY`. Unset, empty and non-unicode values
    /// are all reported as missing.
    pub fn from_env() -> Result<Self, GemError> {
        Self::from_value(env::var(API_KEY_ENV).ok())
    }

    pub fn from_value(value: Option<String>) -> Result<Self, GemError> {
        match value {
            Some(key) if !key.is_empty() => Ok(ApiKey(key)),
            _ => Err(GemError::MissingApiKey),
        }
    }

    fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

/// A `generateContent` text part
#[derive(Debug, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// A `generateContent` content item
#[derive(Debug, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// A `generateContent` request body
#[derive(Debug, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

impl GenerateContentRequest {
    /// A single user turn with a single text part. No history, no generation config.
    pub fn from_prompt(prompt: &str) -> Self {
        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
        }
    }
}

/// A `generateContent` response candidate
#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<Content>,
}

/// A `generateContent` response
#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// The text of the first part of the first candidate. Everything else is dropped.
    pub fn into_first_text(self) -> Result<String, GemError> {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .ok_or(GemError::EmptyResponse)
    }
}

/// Anything that can answer a single prompt.
pub trait Generate {
    fn generate(&self, prompt: &str) -> Result<String, GemError>;
}

/// A live connection to the Gemini API. The chat loop owns exactly one.
pub struct Session {
    client: reqwest::blocking::Client,
    api_key: ApiKey,
    model: String,
    base_url: String,
}

impl Session {
    /// Build the HTTP client for `api_key`. No request is made yet.
    pub fn open(api_key: ApiKey) -> Result<Self, GemError> {
        // No timeout, the blocking client would otherwise give up after 30s.
        let client = reqwest::blocking::Client::builder()
            .timeout(None::<Duration>)
            .build()
            .map_err(GemError::Connect)?;
        info!(model = DEFAULT_MODEL, "Gemini session opened");
        Ok(Session {
            client,
            api_key,
            model: DEFAULT_MODEL.to_string(),
            base_url: GEMINI_API_BASE.to_string(),
        })
    }

    /// Point the session at another `models` base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn url(&self) -> String {
        format!(
            "{}/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

impl Generate for Session {
    fn generate(&self, prompt: &str) -> Result<String, GemError> {
        debug!(model = %self.model, prompt_len = prompt.len(), "Gemini API request");

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", self.api_key.as_str())
            .json(&GenerateContentRequest::from_prompt(prompt))
            .send()
            .map_err(GemError::Request)?;

        let status = response.status();
        if !status.is_success() {
            // Keep the status even when the body can't be read.
            let body = response.text().unwrap_or_else(|e| e.to_string());
            return Err(GemError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = response.json().map_err(GemError::Request)?;
        parsed.into_first_text()
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        info!(model = %self.model, "Gemini session released");
    }
}
