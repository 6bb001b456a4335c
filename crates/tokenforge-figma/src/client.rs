//! HTTP client for the variables service.
//!
//! The client wraps `reqwest` with the two endpoints the importer needs
//! and maps transport failures onto the canonical user-facing messages.
//! It is cheaply cloneable; clones share the underlying connection pool.

use std::time::Duration;

use serde_json::{Map, Value};

use crate::api::{CollectionsEnvelope, VariablesEnvelope};

/// Default service base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.figma.com";

/// Header carrying the personal access token.
const TOKEN_HEADER: &str = "X-Figma-Token";

/// Result type alias for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Canonical API failure modes surfaced to users.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    /// The token was rejected (HTTP 401/403).
    #[error("Authentication failed: Invalid or expired Personal Access Token")]
    Authentication,

    /// The file key did not resolve (HTTP 404).
    #[error("File not found: Invalid file key \"{0}\"")]
    FileNotFound(String),

    /// Too many requests (HTTP 429), with the `Retry-After` delay when the
    /// service provided one.
    #[error("Rate limit exceeded{}", retry_suffix(.retry_after))]
    RateLimited {
        /// Seconds to wait, from the `Retry-After` header.
        retry_after: Option<u64>,
    },

    /// The service returned an error body with an `err` field.
    #[error("{0}")]
    Service(String),

    /// Any other non-2xx status.
    #[error("API request failed with status {0}")]
    Status(u16),

    /// Connection, timeout, or body-decoding failure.
    #[error("{0}")]
    Transport(String),
}

fn retry_suffix(retry_after: &Option<u64>) -> String {
    match retry_after {
        Some(seconds) => format!(". Retry after {seconds} seconds"),
        None => String::new(),
    }
}

/// Configuration for [`FigmaClient`].
#[derive(Debug, Clone)]
pub struct FigmaClientConfig {
    /// Service base URL, overridable for mirrors and tests.
    pub base_url: String,
    /// Whole-request timeout.
    pub timeout: Duration,
    /// Connect timeout.
    pub connect_timeout: Duration,
    /// User agent sent with every request.
    pub user_agent: String,
}

impl Default for FigmaClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: format!("tokenforge/{} (Rust)", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// A client bound to one personal access token.
#[derive(Clone)]
pub struct FigmaClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl std::fmt::Debug for FigmaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The access token is deliberately not printed.
        f.debug_struct("FigmaClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl FigmaClient {
    /// Create a client with default configuration.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(api_key, FigmaClientConfig::default())
    }

    /// Create a client with explicit configuration.
    pub fn with_config(api_key: impl Into<String>, config: FigmaClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The base URL requests are issued against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the file's local variables, keyed by variable id, in response
    /// order. Records are returned raw; the importer converts and reports
    /// per-record problems as warnings.
    pub async fn local_variables(&self, file_key: &str) -> Result<Map<String, Value>> {
        let url = format!("{}/v1/files/{file_key}/variables/local", self.base_url);
        let envelope: VariablesEnvelope = self.get_json(&url, file_key).await?;
        Ok(envelope.meta.variables)
    }

    /// Fetch the file's variable collections, keyed by collection id, in
    /// response order.
    pub async fn variable_collections(&self, file_key: &str) -> Result<Map<String, Value>> {
        let url = format!("{}/v1/files/{file_key}/variable-collections", self.base_url);
        let envelope: CollectionsEnvelope = self.get_json(&url, file_key).await?;
        Ok(envelope.meta.variable_collections)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        file_key: &str,
    ) -> Result<T> {
        tracing::debug!(target: "tokenforge_figma", "GET {url}");

        let response = self
            .client
            .get(url)
            .header(TOKEN_HEADER, &self.api_key)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let response = check_status(response, file_key).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::Transport(format!("Failed to decode response body: {e}")))
    }
}

/// Map a non-success status onto the canonical error taxonomy.
async fn check_status(
    response: reqwest::Response,
    file_key: &str,
) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    Err(match status.as_u16() {
        401 | 403 => ApiError::Authentication,
        404 => ApiError::FileNotFound(file_key.to_string()),
        429 => {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.trim().parse().ok());
            ApiError::RateLimited { retry_after }
        }
        code => {
            let body = response.text().await.unwrap_or_default();
            match error_body_message(&body) {
                Some(message) => ApiError::Service(message),
                None => ApiError::Status(code),
            }
        }
    })
}

/// The `err` field of a JSON error body, when present.
fn error_body_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("err")
        .and_then(Value::as_str)
        .map(str::to_string)
}
