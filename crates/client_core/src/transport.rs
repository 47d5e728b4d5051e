//! Outbound calls to the remote calculation service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use shared::{
    domain::{CalculationResult, SubmissionRequest},
    protocol::{ErrorResponse, CALCULATE_PATH},
};
use tracing::{debug, warn};

use crate::{
    error::ClientError,
    types::{FailureInfo, TRANSPORT_FAILURE_STATUS},
};

#[async_trait]
pub trait CalculatorService: Send + Sync {
    async fn calculate(&self, request: &SubmissionRequest)
        -> Result<CalculationResult, FailureInfo>;
}

pub struct HttpCalculatorService {
    http: Client,
    endpoint: String,
}

impl HttpCalculatorService {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), server_url)
    }

    pub fn with_timeout(
        server_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, ClientError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::with_client(builder.build()?, server_url))
    }

    pub fn with_client(http: Client, server_url: impl Into<String>) -> Self {
        let server_url = server_url.into();
        Self {
            http,
            endpoint: format!("{}{CALCULATE_PATH}", server_url.trim_end_matches('/')),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CalculatorService for HttpCalculatorService {
    async fn calculate(
        &self,
        request: &SubmissionRequest,
    ) -> Result<CalculationResult, FailureInfo> {
        debug!(endpoint = %self.endpoint, "posting calculation request");
        let response = match self.http.post(&self.endpoint).json(request).send().await {
            Ok(response) => response,
            Err(err) => {
                warn!(endpoint = %self.endpoint, error = %err, "calculation request failed in transport");
                let status = err
                    .status()
                    .map(|status| status.as_u16())
                    .unwrap_or(TRANSPORT_FAILURE_STATUS);
                return Err(FailureInfo::transport(status, err.to_string()));
            }
        };

        let status = response.status();
        debug!(status = status.as_u16(), "calculation response received");
        let body = response
            .bytes()
            .await
            .map_err(|err| FailureInfo::transport(status.as_u16(), err.to_string()))?;

        decode_response(status, &body)
    }
}

fn decode_response(status: StatusCode, body: &[u8]) -> Result<CalculationResult, FailureInfo> {
    if status.is_success() {
        return serde_json::from_slice::<CalculationResult>(body).map_err(|err| {
            FailureInfo::transport(status.as_u16(), format!("invalid response body: {err}"))
        });
    }

    let parsed = serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(ErrorResponse::from_value);
    match parsed {
        Some(parsed) => Err(FailureInfo::from_error_response(status.as_u16(), parsed)),
        None => Err(FailureInfo::transport(
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown status"),
        )),
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
