//! Anonymization API client
//!
//! Submits a dataset plus a reference to an externally hosted
//! anonymization configuration to the remote service. Two endpoints,
//! one per payload shape:
//!
//! - `PUT {base}/api/anonymization` for JSON-LD
//! - `PUT {base}/api/anonymization/flatjson` for flat JSON
//!
//! One request, one awaited response; no retries, no streaming.

use kanon_common::api::{FlatJsonRequest, JsonLdRequest};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Default timeout for anonymization requests
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

const USER_AGENT: &str = concat!("kanon/", env!("CARGO_PKG_VERSION"));

/// Client errors for the remote anonymization and canonicalization
/// services
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("The data is too large to convert to Turtle format. Please try with a smaller dataset.")]
    PayloadTooLarge,

    #[error("Parse error: {0}")]
    Parse(String),

    #[error(transparent)]
    InvalidRequest(#[from] kanon_common::Error),
}

/// Anonymization service client
pub struct AnonymizerClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl AnonymizerClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Anonymize a JSON-LD dataset.
    pub async fn anonymize_json_ld(&self, request: &JsonLdRequest) -> Result<Value, ApiError> {
        request.validate()?;
        let url = format!("{}/api/anonymization", self.base_url);
        self.put_json(&url, request).await
    }

    /// Anonymize a flat-JSON dataset.
    pub async fn anonymize_flat_json(&self, request: &FlatJsonRequest) -> Result<Value, ApiError> {
        request.validate()?;
        let url = format!("{}/api/anonymization/flatjson", self.base_url);
        self.put_json(&url, request).await
    }

    async fn put_json<B: Serialize>(&self, url: &str, body: &B) -> Result<Value, ApiError> {
        debug!(url = %url, "Submitting anonymization request");

        let response = self
            .http_client
            .put(url)
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ApiError::Api(status.as_u16(), error_text));
        }

        let value: Value = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;

        info!(url = %url, "Anonymization response received");
        Ok(value)
    }
}
