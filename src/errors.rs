use thiserror::Error;

/// gemsearch errors. Every variant is fatal to the chat.
#[derive(Debug, Error)]
pub enum GemError {
    #[error("GEMINI_API_KEY is not set. Please set the API key using 'export GEMINI_API_KEY=<your-api-key>'")]
    MissingApiKey,
    #[error("Failed to create Gemini client: {0}")]
    Connect(#[source] reqwest::Error),
    #[error("Gemini request failed: {0}")]
    Request(#[source] reqwest::Error),
    #[error("Gemini API returned {status}: {body}")]
    Api { status: u16, body: String },
    #[error("Gemini returned no text in its first candidate.")]
    EmptyResponse,
    #[error(transparent)]
    StdioError(#[from] std::io::Error),
}

impl GemError {
    /// Whether a retry could plausibly have succeeded. Only used for logging;
    /// the chat never retries.
    pub fn is_transient(&self) -> bool {
        match self {
            GemError::Request(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            GemError::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}
