//! One-shot retrieval of the practitioner list.
//!
//! The list is read once per session. There is no retry and no partial
//! result: any failure is terminal for the session.

use std::path::Path;
use std::time::Duration;

use thiserror::Error;

use crate::config::DirectoryConfig;
use crate::models::Doctor;

/// Fetch errors.
///
/// Every variant is shown to the user the same way; the distinction only
/// matters for logs.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Transport(String),

    #[error("Upstream returned status {0}")]
    Status(u16),

    #[error("Payload is not a JSON array of doctors: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("Failed to read snapshot: {0}")]
    Io(#[from] std::io::Error),
}

pub type FetchResult<T> = Result<T, FetchError>;

/// Decode a JSON array of records.
pub fn parse_doctors(body: &str) -> FetchResult<Vec<Doctor>> {
    Ok(serde_json::from_str(body)?)
}

/// Apply the response rules: any non-2xx status fails, then the body must parse.
pub fn parse_response(status: u16, body: &str) -> FetchResult<Vec<Doctor>> {
    if !(200..300).contains(&status) {
        return Err(FetchError::Status(status));
    }
    parse_doctors(body)
}

/// Load a local JSON snapshot with the same payload rules as the endpoint.
pub fn load_file<P: AsRef<Path>>(path: P) -> FetchResult<Vec<Doctor>> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "Reading doctor snapshot");
    let body = std::fs::read_to_string(path)?;
    parse_doctors(&body)
}

/// HTTP client for the directory endpoint.
pub struct HttpFetcher {
    http_client: reqwest::Client,
    endpoint: String,
}

impl HttpFetcher {
    pub fn new(config: &DirectoryConfig) -> FetchResult<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Ok(Self {
            http_client,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Issue the single GET and decode the record list.
    pub async fn fetch_all(&self) -> FetchResult<Vec<Doctor>> {
        tracing::debug!(url = %self.endpoint, "Fetching doctors");

        let response = self
            .http_client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let doctors = parse_response(status, &body)?;
        tracing::info!(count = doctors.len(), "Doctors fetched");
        Ok(doctors)
    }
}
