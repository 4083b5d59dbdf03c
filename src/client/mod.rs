//! Sidecar Client
//!
//! Typed HTTP client used by orchestrators and the operator CLI to talk to
//! a running sidecar. The client holds no authority; every decision is made
//! server-side.

mod errors;

use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;

use crate::health::{HealthVerdict, StatusBody, STATUS_PATH};
use crate::http_server::StatusDocument;

pub use errors::{ClientError, ClientResult};

/// Client for the sidecar control API
#[derive(Debug, Clone)]
pub struct SidecarClient {
    base_url: String,
    http: Client,
}

impl SidecarClient {
    /// Create a client for the sidecar at `base_url` (e.g. `http://10.0.0.4:5433`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http_client(base_url, Client::new())
    }

    /// Create a client reusing an existing HTTP client
    pub fn with_http_client(base_url: impl Into<String>, http: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, http }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Fetch the diagnostic status document.
    pub async fn status(&self) -> ClientResult<StatusDocument> {
        let response = self.http.get(self.url("/status")).send().await?;
        let response = check(response).await?;
        Ok(response.json().await?)
    }

    /// Query the lightweight health probe.
    pub async fn probe(&self) -> ClientResult<HealthVerdict> {
        let response = self.http.get(self.url(STATUS_PATH)).send().await?;
        let status = response.status();
        if status != StatusCode::OK && status != StatusCode::INTERNAL_SERVER_ERROR {
            return Err(api_error(response).await);
        }

        let body: StatusBody = response.json().await?;
        Ok(body.data.status)
    }

    /// Request a graceful stop. Returns once both steps succeeded.
    pub async fn stop(&self) -> ClientResult<()> {
        let response = self.http.post(self.url("/stop")).send().await?;
        check(response).await?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: String,
}

async fn check(response: Response) -> ClientResult<Response> {
    if response.status().is_success() {
        Ok(response)
    } else {
        Err(api_error(response).await)
    }
}

async fn api_error(response: Response) -> ClientError {
    let status = response.status().as_u16();
    let text = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<ApiErrorBody>(&text) {
        Ok(body) => body.error,
        Err(_) if text.is_empty() => format!("unexpected status {}", status),
        Err(_) => text,
    };
    ClientError::Api { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash() {
        let client = SidecarClient::new("http://127.0.0.1:5433/");
        assert_eq!(client.base_url(), "http://127.0.0.1:5433");
        assert_eq!(client.url("/status"), "http://127.0.0.1:5433/status");
    }
}
