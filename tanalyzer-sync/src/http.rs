//! HTTP transport against the backend servlet.
//!
//! The backend exposes a single endpoint; the operation is selected by query
//! parameters. Bodies are JSON in both directions.

use crate::error::{SyncError, SyncResult};
use crate::transport::{BackendRequest, Method, Transport, TransportError};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// HTTP transport configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpTransportConfig {
    /// Full URL of the servlet endpoint.
    pub servlet_url: String,
    /// Per-request timeout (seconds).
    pub timeout_secs: u64,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            servlet_url: "http://localhost:8080/RestServlet".to_string(),
            timeout_secs: 30,
        }
    }
}

/// reqwest-backed [`Transport`].
pub struct HttpTransport {
    config: HttpTransportConfig,
    client: Client,
}

impl HttpTransport {
    pub fn new(config: HttpTransportConfig) -> SyncResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SyncError::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { config, client })
    }

    pub fn servlet_url(&self) -> &str {
        &self.config.servlet_url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn request(&self, request: BackendRequest) -> Result<Value, TransportError> {
        debug!("HTTP {}", request.route());

        let builder = match request.method {
            Method::Get => self.client.get(&self.config.servlet_url),
            Method::Post => self.client.post(&self.config.servlet_url),
        };
        let builder = builder
            .header(CONTENT_TYPE, "application/json")
            .query(&request.query);
        let builder = match &request.body {
            Some(body) => builder.json(body),
            None => builder,
        };

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))
    }
}
