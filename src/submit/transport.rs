//! Delivery of a submission to the survey endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use thiserror::Error;

use super::payload::{SubmissionPayload, SubmitResponse};
use crate::config::SubmitConfig;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("request timed out after {0}s")]
    Timeout(u64),

    #[error("{0}")]
    Network(String),

    #[error("invalid response: {0}")]
    Decode(String),

    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

/// Something that can carry a payload to the endpoint and bring back its reply
#[async_trait]
pub trait SubmissionTransport: Send + Sync {
    /// Where submissions go, for logging
    fn endpoint(&self) -> &str;

    async fn submit(&self, payload: &SubmissionPayload) -> Result<SubmitResponse, TransportError>;
}

/// JSON-over-HTTP transport
pub struct HttpTransport {
    endpoint: String,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("survey-wizard/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Client(e.to_string()))?;

        Ok(Self {
            endpoint: endpoint.into(),
            timeout_secs: timeout.as_secs(),
            client,
        })
    }

    pub fn from_config(config: &SubmitConfig) -> Result<Self, TransportError> {
        Self::new(
            config.endpoint.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    fn classify(&self, err: &reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout(self.timeout_secs)
        } else if err.is_decode() {
            TransportError::Decode(err.to_string())
        } else {
            TransportError::Network(err.to_string())
        }
    }
}

#[async_trait]
impl SubmissionTransport for HttpTransport {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn submit(&self, payload: &SubmissionPayload) -> Result<SubmitResponse, TransportError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(ACCEPT, "application/json")
            .json(payload)
            .send()
            .await
            .map_err(|e| self.classify(&e))?;

        let status = response.status();
        tracing::debug!(endpoint = %self.endpoint, %status, "submission response received");

        // The endpoint reports failures in the body, whatever the status
        let body = response.bytes().await.map_err(|e| self.classify(&e))?;
        serde_json::from_slice(&body).map_err(|e| TransportError::Decode(e.to_string()))
    }
}
