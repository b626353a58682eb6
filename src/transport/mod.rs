//! HTTP transport to the remote embedding/completion service.
//!
//! This layer is a thin collaborator around the core: it fetches raw
//! vectors and completion texts, and hands them to the codec and the host.
//! Failures are always typed. A non-success status becomes
//! [`TransportError::ServiceError`] carrying the raw response body, never a
//! string result that looks like success. No retries happen here; retry
//! policy belongs to the caller.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::embedding;
use crate::error::{PromptqlResult, TransportError};

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Transport configuration.
///
/// The defaults target the reference service; every field can be overridden
/// for proxies or compatible endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportConfig {
    /// Service base URL, without a trailing slash.
    pub base_url: String,

    /// Model requested from the embedding endpoint.
    pub embedding_model: String,

    /// Model requested from the completion endpoint.
    pub completion_model: String,

    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            embedding_model: "text-embedding-ada-002".to_string(),
            completion_model: "text-davinci-003".to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Client for the remote model service.
///
/// # Examples
///
/// ```rust,ignore
/// let client = ModelClient::new(std::env::var("MODEL_API_KEY")?)?;
/// let blob = client.encoded_embedding("text to embed").await?;
/// let reply = client.completion("Say hello", 64, 0.7).await?;
/// ```
pub struct ModelClient {
    config: TransportConfig,
    api_key: String,
    client: reqwest::Client,
}

impl ModelClient {
    /// Creates a client with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::RequestFailed` if the underlying HTTP
    /// client cannot be constructed.
    pub fn new(api_key: impl Into<String>) -> Result<Self, TransportError> {
        Self::with_config(api_key, TransportConfig::default())
    }

    /// Creates a client with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::RequestFailed` if the underlying HTTP
    /// client cannot be constructed.
    pub fn with_config(
        api_key: impl Into<String>,
        mut config: TransportConfig,
    ) -> Result<Self, TransportError> {
        config.base_url = config.base_url.trim_end_matches('/').to_string();

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TransportError::RequestFailed {
                message: e.to_string(),
            })?;

        Ok(Self {
            config,
            api_key: api_key.into(),
            client,
        })
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// Fetches the embedding vector for `text`.
    ///
    /// # Errors
    ///
    /// `ServiceError` on a non-success status (the raw body is preserved in
    /// the error), `RequestFailed` on network problems, and
    /// `UnexpectedResponse` when the payload lacks the expected fields.
    pub async fn embedding(&self, text: &str) -> Result<Vec<f32>, TransportError> {
        let url = format!("{}/embeddings", self.config.base_url);
        let body = serde_json::json!({
            "input": text,
            "model": self.config.embedding_model,
        });

        debug!(model = %self.config.embedding_model, "Sending embedding request");

        let response = self.post_json(&url, &body).await?;
        let parsed: EmbeddingResponse = parse_body(response).await?;

        parsed
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| TransportError::UnexpectedResponse {
                message: "no embedding data in response".to_string(),
            })
    }

    /// Fetches the embedding vector for `text` and encodes it as a blob.
    ///
    /// This is the host-facing embedding function: the returned bytes go
    /// straight into a column and back through
    /// [`crate::embedding::encoded_similarity`].
    ///
    /// # Errors
    ///
    /// Any transport failure from [`ModelClient::embedding`], or a
    /// `ShapeError` if the service returns a vector of the wrong width.
    pub async fn encoded_embedding(&self, text: &str) -> PromptqlResult<Vec<u8>> {
        let vector = self.embedding(text).await?;
        Ok(embedding::encode(&vector)?)
    }

    /// Requests a completion for `prompt`.
    ///
    /// # Errors
    ///
    /// `ServiceError` on a non-success status, `RequestFailed` on network
    /// problems, `UnexpectedResponse` when no completion text is present.
    pub async fn completion(
        &self,
        prompt: &str,
        max_tokens: u32,
        temperature: f64,
    ) -> Result<String, TransportError> {
        let url = format!("{}/completions", self.config.base_url);
        let body = serde_json::json!({
            "model": self.config.completion_model,
            "prompt": prompt,
            "max_tokens": max_tokens,
            "temperature": temperature,
        });

        debug!(model = %self.config.completion_model, "Sending completion request");

        let response = self.post_json(&url, &body).await?;
        let parsed: CompletionResponse = parse_body(response).await?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.text)
            .ok_or_else(|| TransportError::UnexpectedResponse {
                message: "no choices in response".to_string(),
            })
    }

    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<reqwest::Response, TransportError> {
        let response = self
            .client
            .post(url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| TransportError::RequestFailed {
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status, body = %body, "Service returned error");
            return Err(TransportError::ServiceError { status, body });
        }

        Ok(response)
    }
}

async fn parse_body<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, TransportError> {
    response
        .json()
        .await
        .map_err(|e| TransportError::UnexpectedResponse {
            message: format!("failed to parse response: {e}"),
        })
}

// --- Service API types (internal) ---

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    text: String,
}
