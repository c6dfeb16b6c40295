//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the relay.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the relay.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RelayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Inbound request deadlines.
    pub timeouts: TimeoutConfig,

    /// Cloud telemetry endpoint settings.
    pub telemetry: TelemetryConfig,

    /// Periodic weather forecast push.
    pub weather: WeatherConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    #[serde(default)]
    pub security: SecurityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8000".to_string(),
        }
    }
}

/// Timeout configuration for inbound requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Total time a device request may take, including the upstream push.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Cloud telemetry endpoint configuration.
///
/// The device token is a credential: prefer `TELEMETRY_DEVICE_TOKEN` in the
/// environment over writing it into the file.
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Scheme and host of the telemetry API (e.g., "https://thingsboard.cloud").
    pub base_url: String,

    /// Device access token embedded in the telemetry path.
    pub device_token: String,

    /// Timeout for a single push in seconds.
    pub timeout_secs: u64,

    /// Answer 502 instead of 200 when the push fails in transit.
    pub strict_upstream_errors: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            base_url: "https://thingsboard.cloud".to_string(),
            device_token: String::new(),
            timeout_secs: 10,
            strict_upstream_errors: false,
        }
    }
}

impl TelemetryConfig {
    /// Full telemetry URL for the configured device.
    pub fn telemetry_url(&self) -> String {
        format!(
            "{}/api/v1/{}/telemetry",
            self.base_url.trim_end_matches('/'),
            self.device_token
        )
    }
}

impl std::fmt::Debug for TelemetryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelemetryConfig")
            .field("base_url", &self.base_url)
            .field("device_token", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .field("strict_upstream_errors", &self.strict_upstream_errors)
            .finish()
    }
}

/// Weather forecast push configuration.
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// Enable the periodic forecast push.
    pub enabled: bool,

    /// WeatherAPI base URL.
    pub base_url: String,

    /// WeatherAPI key. Usually supplied through `WEATHER_KEY`.
    pub api_key: String,

    /// Location query passed to WeatherAPI (`q=`).
    pub location: String,

    /// Crop label attached to every weather record.
    pub crop: String,

    /// Interval between pushes in seconds.
    pub interval_secs: u64,

    /// Timeout for the forecast request in seconds.
    pub timeout_secs: u64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: "http://api.weatherapi.com".to_string(),
            api_key: String::new(),
            location: "Hanoi".to_string(),
            crop: "Rau muống".to_string(),
            interval_secs: 600,
            timeout_secs: 10,
        }
    }
}

impl std::fmt::Debug for WeatherConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherConfig")
            .field("enabled", &self.enabled)
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("location", &self.location)
            .field("crop", &self.crop)
            .field("interval_secs", &self.interval_secs)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Request hardening.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum body size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_size: 64 * 1024, // 64KB, readings are tiny
        }
    }
}
