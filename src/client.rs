//! HTTP client for a remote scoring server.
//!
//! Network failures map to `ClientError::Unreachable` and are kept apart
//! from validation errors returned by the server.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Deserialize;

use crate::config::ClientConfig;
use crate::models::{PingStatus, RiskAssessment, RiskInput};
use crate::validation::FieldErrors;

/// Message used when the server fails without a usable error body.
pub const SERVER_ERROR_MESSAGE: &str = "Server error.";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Server not reachable at {0}")]
    Unreachable(String),
    #[error("Request rejected: {0}")]
    Rejected(FieldErrors),
    #[error("Server returned {status}")]
    Server { status: u16 },
    #[error("Response parsing error: {0}")]
    ResponseParsing(String),
    #[error("HTTP client error: {0}")]
    HttpClient(String),
}

impl ClientError {
    /// Field errors to show to the user. Network failures have none.
    pub fn field_errors(&self) -> Option<FieldErrors> {
        match self {
            Self::Rejected(errors) => Some(errors.clone()),
            Self::Server { .. } => Some(FieldErrors::general(SERVER_ERROR_MESSAGE)),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    errors: Option<BTreeMap<String, String>>,
}

/// Async client for `/api/risk` and `/api/ping`.
#[derive(Debug, Clone)]
pub struct RiskClient {
    base_url: String,
    client: reqwest::Client,
}

impl RiskClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ClientError::HttpClient(e.to_string()))?;

        Ok(Self {
            base_url: config.api_base.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Submit an input for scoring.
    pub async fn assess(&self, input: &RiskInput) -> Result<RiskAssessment, ClientError> {
        let url = format!("{}/api/risk", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&input.to_request())
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(rejection(status.as_u16(), &body));
        }

        response
            .json::<RiskAssessment>()
            .await
            .map_err(|e| ClientError::ResponseParsing(e.to_string()))
    }

    /// Check that the server is up.
    pub async fn ping(&self) -> Result<PingStatus, ClientError> {
        let url = format!("{}/api/ping", self.base_url);

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::CACHE_CONTROL, "no-store")
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Server {
                status: status.as_u16(),
            });
        }

        response
            .json::<PingStatus>()
            .await
            .map_err(|e| ClientError::ResponseParsing(e.to_string()))
    }

    fn map_send_error(&self, e: reqwest::Error) -> ClientError {
        if e.is_connect() || e.is_timeout() {
            tracing::warn!(base_url = %self.base_url, error = %e, "Risk server unreachable");
            ClientError::Unreachable(self.base_url.clone())
        } else {
            ClientError::HttpClient(e.to_string())
        }
    }
}

/// Non-2xx body → field errors when present, else a bare status.
fn rejection(status: u16, body: &str) -> ClientError {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(ErrorResponse {
            errors: Some(errors),
        }) if !errors.is_empty() => ClientError::Rejected(FieldErrors::from_wire(errors)),
        _ => ClientError::Server { status },
    }
}
