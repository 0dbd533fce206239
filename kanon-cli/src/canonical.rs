//! Canonicalization client (JSON-LD to Turtle)
//!
//! Converts a JSON-LD payload to an RDF Turtle serialization via the
//! remote canonicalization endpoint. Callers strip indicator entries
//! first (`kanon_common::kpi::strip_kpi_entries`); the endpoint should
//! not see indicator metadata, and stripping keeps the payload small.

use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::client::ApiError;

/// Default timeout for canonicalization requests
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

const TURTLE_MIME: &str = "text/turtle";

const USER_AGENT: &str = concat!("kanon/", env!("CARGO_PKG_VERSION"));

/// Canonicalization service client
pub struct CanonicalClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl CanonicalClient {
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

    /// Convert a JSON-LD payload to Turtle.
    pub async fn canonicalize(&self, payload: &Value) -> Result<String, ApiError> {
        let url = format!("{}/soya-api/canonical", self.base_url);
        debug!(url = %url, "Requesting Turtle canonicalization");

        let response = self
            .http_client
            .post(&url)
            .header(reqwest::header::ACCEPT, TURTLE_MIME)
            .json(payload)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::PAYLOAD_TOO_LARGE {
            return Err(ApiError::PayloadTooLarge);
        }
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ApiError::Api(status.as_u16(), error_text));
        }

        response
            .text()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }
}
