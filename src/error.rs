//! Crate-level error type.

use thiserror::Error;

use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::weather::WeatherError;

/// Errors that stop the relay from starting or serving.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("telemetry client error: {0}")]
    Telemetry(#[from] TelemetryError),

    #[error("weather client error: {0}")]
    Weather(#[from] WeatherError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
