//! Outbound telemetry client.
//!
//! # Responsibilities
//! - POST timestamped samples to the device telemetry URL
//! - Enforce the per-push timeout
//! - Report the upstream status and body without judging them
//!
//! No retries: a failed push is reported to the caller once.

use serde::Serialize;
use std::time::Duration;

use crate::config::TelemetryConfig;
use crate::telemetry::types::{PushOutcome, TelemetryEntry, TelemetryError};

/// HTTP client bound to one device's telemetry endpoint.
#[derive(Clone)]
pub struct TelemetryClient {
    http: reqwest::Client,
    url: String,
    timeout_secs: u64,
}

impl TelemetryClient {
    /// Create a client from configuration.
    pub fn new(config: &TelemetryConfig) -> Result<Self, TelemetryError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("esp32-relay/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            url: config.telemetry_url(),
            timeout_secs: config.timeout_secs,
        })
    }

    /// Push samples as a JSON array.
    ///
    /// Any HTTP response counts as delivered, including 4xx/5xx. Only
    /// transport failures (DNS, refused connection, timeout) are errors.
    pub async fn push<V: Serialize>(
        &self,
        entries: &[TelemetryEntry<V>],
    ) -> Result<PushOutcome, TelemetryError> {
        tracing::debug!(samples = entries.len(), "Pushing telemetry");

        let response = self
            .http
            .post(&self.url)
            .json(entries)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.classify(e))?;

        if !status.is_success() {
            tracing::warn!(status = %status, body = %body, "Telemetry endpoint rejected push");
        }

        Ok(PushOutcome {
            status: status.as_u16(),
            body,
        })
    }

    fn classify(&self, err: reqwest::Error) -> TelemetryError {
        if err.is_timeout() {
            TelemetryError::Timeout(self.timeout_secs)
        } else {
            TelemetryError::Transport(err.without_url())
        }
    }
}

impl std::fmt::Debug for TelemetryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The URL embeds the device token.
        f.debug_struct("TelemetryClient")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config(base_url: &str) -> TelemetryConfig {
        TelemetryConfig {
            base_url: base_url.to_string(),
            device_token: "test-token".to_string(),
            timeout_secs: 1,
            strict_upstream_errors: false,
        }
    }

    #[test]
    fn test_debug_hides_token() {
        let client = TelemetryClient::new(&config("http://127.0.0.1:1")).unwrap();
        assert!(!format!("{:?}", client).contains("test-token"));
    }

    #[tokio::test]
    async fn test_connection_refused_is_error() {
        // Bind then drop to get a port nobody listens on.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = TelemetryClient::new(&config(&format!("http://{}", addr))).unwrap();
        let result = client.push(&[TelemetryEntry::now(json!({"temperature": 1.0}))]).await;

        let err = result.unwrap_err();
        assert!(matches!(err, TelemetryError::Transport(_)));
        assert!(!err.to_string().contains("test-token"));
    }
}
