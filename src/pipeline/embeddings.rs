//! Client for the external embedding service
//!
//! The service is an opaque HTTP endpoint that turns one document into one
//! vector:
//!
//! ```text
//! POST {embed_url}
//! {"text": "<document contents>"}
//!
//! 200 OK
//! {"embedding": [0.12, -0.03, ...]}
//! ```
//!
//! Anything other than a 2xx with that body is a per-document failure.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Embedding vector type
///
/// Using `Vec<f32>` for flexibility across different dimensions.
/// For 384-dim embeddings, this is ~1.5KB per vector.
pub type Embedding = Vec<f32>;

/// Errors that can occur while requesting an embedding
#[derive(Debug, Clone, PartialEq)]
pub enum EmbeddingError {
    /// Non-2xx response from the service
    ApiError { status: u16, message: String },
    /// Connection failure or timeout
    NetworkError(String),
    /// 2xx response whose body is not `{"embedding": [...]}`
    InvalidResponse(String),
    /// Client construction failed
    Internal(String),
}

impl fmt::Display for EmbeddingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ApiError { status, message } => {
                if message.is_empty() {
                    write!(f, "API error ({})", status)
                } else {
                    write!(f, "API error ({}): {}", status, message)
                }
            }
            Self::NetworkError(msg) => write!(f, "Network error: {}", msg),
            Self::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
            Self::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for EmbeddingError {}

#[derive(Debug, Serialize)]
struct EmbedRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    embedding: Vec<f32>,
}

/// Longest slice of an error body kept in `ApiError::message`
const MAX_ERROR_BODY: usize = 200;

/// HTTP client for the embedding endpoint
///
/// Cheap to share behind an `Arc`; `reqwest::Client` pools connections.
#[derive(Debug, Clone)]
pub struct EmbeddingClient {
    client: reqwest::Client,
    url: String,
}

impl EmbeddingClient {
    /// Create a client for `url` with a per-request timeout
    ///
    /// # Errors
    /// Returns `EmbeddingError::Internal` if the HTTP client cannot be built
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, EmbeddingError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| EmbeddingError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        let url = url.into();
        tracing::debug!(url = %url, ?timeout, "Initialized embedding client");

        Ok(Self { client, url })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Request the embedding of `text`
    pub async fn embed(&self, text: &str) -> Result<Embedding, EmbeddingError> {
        let response = self
            .client
            .post(&self.url)
            .json(&EmbedRequest { text })
            .send()
            .await
            .map_err(|e| EmbeddingError::NetworkError(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::ApiError {
                status: status.as_u16(),
                message: truncate(body.trim(), MAX_ERROR_BODY),
            });
        }

        let body: EmbedResponse = response
            .json()
            .await
            .map_err(|e| EmbeddingError::InvalidResponse(e.to_string()))?;

        Ok(body.embedding)
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}
