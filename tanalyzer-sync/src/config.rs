//! Session configuration.

use crate::error::{SyncError, SyncResult};
use crate::http::HttpTransportConfig;
use crate::readiness::ReadinessGate;
use serde::{Deserialize, Serialize};

/// Configuration for a sync session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Backend endpoint that answers every GET and POST.
    pub servlet_url: String,
    /// Timeout applied by the HTTP transport to each request (seconds).
    pub request_timeout_secs: u64,
    /// When consumers get re-initialized after a load.
    pub readiness_gate: ReadinessGate,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            servlet_url: "http://localhost:8080/RestServlet".to_string(),
            request_timeout_secs: 30,
            readiness_gate: ReadinessGate::default(),
        }
    }
}

impl SyncConfig {
    /// Parses a JSON configuration; missing fields keep their defaults.
    pub fn from_json(text: &str) -> SyncResult<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SyncResult<()> {
        if self.servlet_url.trim().is_empty() {
            return Err(SyncError::Config("servlet_url must not be empty".into()));
        }
        if self.request_timeout_secs == 0 {
            return Err(SyncError::Config(
                "request_timeout_secs must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Transport settings derived from this configuration.
    pub fn http(&self) -> HttpTransportConfig {
        HttpTransportConfig {
            servlet_url: self.servlet_url.clone(),
            timeout_secs: self.request_timeout_secs,
        }
    }
}
