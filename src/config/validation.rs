//! Configuration validation.
//!
//! Serde handles syntax; this module checks values that would only fail at
//! runtime (empty credentials, bad URLs, zero timeouts). All errors are
//! collected instead of stopping at the first one.

use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::RelayConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a socket address")]
    BindAddress(String),

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroRequestTimeout,

    #[error("timeouts.request_secs ({request_secs}) must exceed telemetry.timeout_secs ({telemetry_secs})")]
    RequestTimeoutTooShort { request_secs: u64, telemetry_secs: u64 },

    #[error("telemetry.device_token is empty (set TELEMETRY_DEVICE_TOKEN)")]
    MissingDeviceToken,

    #[error("telemetry.base_url '{0}' is not a valid http(s) URL")]
    TelemetryUrl(String),

    #[error("telemetry.timeout_secs must be greater than zero")]
    ZeroTelemetryTimeout,

    #[error("weather.api_key is empty (set WEATHER_KEY or WEATHER_API_KEY)")]
    MissingWeatherKey,

    #[error("weather.location is empty")]
    MissingWeatherLocation,

    #[error("weather.base_url '{0}' is not a valid http(s) URL")]
    WeatherUrl(String),

    #[error("weather.interval_secs must be greater than zero")]
    ZeroWeatherInterval,

    #[error("observability.metrics_address '{0}' is not a socket address")]
    MetricsAddress(String),
}

/// Validate a configuration, returning every problem found.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    let telemetry = &config.telemetry;
    if telemetry.device_token.trim().is_empty() {
        errors.push(ValidationError::MissingDeviceToken);
    }
    if !is_http_url(&telemetry.base_url) {
        errors.push(ValidationError::TelemetryUrl(telemetry.base_url.clone()));
    }
    if telemetry.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTelemetryTimeout);
    }
    // A push must time out before the inbound deadline does.
    if config.timeouts.request_secs != 0 && config.timeouts.request_secs <= telemetry.timeout_secs {
        errors.push(ValidationError::RequestTimeoutTooShort {
            request_secs: config.timeouts.request_secs,
            telemetry_secs: telemetry.timeout_secs,
        });
    }

    let weather = &config.weather;
    if weather.enabled {
        if weather.api_key.trim().is_empty() {
            errors.push(ValidationError::MissingWeatherKey);
        }
        if weather.location.trim().is_empty() {
            errors.push(ValidationError::MissingWeatherLocation);
        }
        if !is_http_url(&weather.base_url) {
            errors.push(ValidationError::WeatherUrl(weather.base_url.clone()));
        }
        if weather.interval_secs == 0 {
            errors.push(ValidationError::ZeroWeatherInterval);
        }
    }

    let observability = &config.observability;
    if observability.metrics_enabled
        && observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(observability.metrics_address.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_http_url(raw: &str) -> bool {
    match url::Url::parse(raw) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.host_str().is_some(),
        Err(_) => false,
    }
}
