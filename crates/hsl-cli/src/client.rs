//! HTTP client for the scoring service.

use std::time::Duration;

use hsl_core::{Label, ScoreRequest, ScoreResponse, StatusResponse};
use reqwest::Client;
use thiserror::Error;

use crate::report::ScoredBatch;

pub const DEFAULT_API_URL: &str = "http://localhost:8013";

const SCORE_TIMEOUT: Duration = Duration::from_secs(30);
const STATUS_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Add at least one non-empty headline.")]
    NoHeadlines,

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("service returned {got} labels for {expected} headlines")]
    Misaligned { expected: usize, got: usize },
}

/// Result of a liveness check against a reachable service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCheck {
    Ok,
    /// Reachable, but the reply was not `{"status": "OK"}`.
    BadResponse,
}

pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Call `GET /status`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] when the service cannot be reached.
    pub async fn check_status(&self) -> Result<StatusCheck, ClientError> {
        let response = self
            .client
            .get(format!("{}/status", self.base_url))
            .timeout(STATUS_TIMEOUT)
            .send()
            .await?;

        if !response.status().is_success() {
            return Ok(StatusCheck::BadResponse);
        }
        match response.json::<StatusResponse>().await {
            Ok(body) if body.is_ok() => Ok(StatusCheck::Ok),
            _ => Ok(StatusCheck::BadResponse),
        }
    }

    /// Call `POST /score_headlines` with `headlines` exactly as given.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] on connection failure or timeout.
    /// - [`ClientError::Api`] for any non-2xx reply, carrying its body.
    /// - [`ClientError::Misaligned`] if the label count differs from the input.
    pub async fn score(&self, headlines: &[String]) -> Result<Vec<Label>, ClientError> {
        tracing::debug!(url = %self.base_url, count = headlines.len(), "posting headlines");
        let response = self
            .client
            .post(format!("{}/score_headlines", self.base_url))
            .timeout(SCORE_TIMEOUT)
            .json(&ScoreRequest {
                headlines: headlines.to_vec(),
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body: ScoreResponse = response.json().await?;
        if body.labels.len() != headlines.len() {
            return Err(ClientError::Misaligned {
                expected: headlines.len(),
                got: body.labels.len(),
            });
        }
        Ok(body.labels)
    }
}

/// Trim `rows`, drop blanks, and score what remains.
///
/// # Errors
///
/// Returns [`ClientError::NoHeadlines`] without contacting the service when
/// every row is blank, and the errors of [`ApiClient::score`] otherwise.
pub async fn score_rows(client: &ApiClient, rows: &[String]) -> Result<ScoredBatch, ClientError> {
    let payload = non_blank(rows);
    if payload.is_empty() {
        return Err(ClientError::NoHeadlines);
    }
    let labels = client.score(&payload).await?;
    Ok(ScoredBatch::new(payload, labels))
}

/// Trimmed copies of the rows that are not blank, in order.
#[must_use]
pub fn non_blank(rows: &[String]) -> Vec<String> {
    rows.iter()
        .map(|r| r.trim())
        .filter(|r| !r.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
