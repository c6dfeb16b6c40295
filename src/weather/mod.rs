//! Weather forecast push.
//!
//! # Data Flow
//! ```text
//! interval tick (reporter.rs)
//!     → client.rs (GET WeatherAPI forecast.json)
//!     → build_telemetry (flat map, conditions via translate.rs)
//!     → TelemetryClient::push([{ts, values}])
//! ```
//!
//! Failures are logged and retried on the next tick only.

pub mod client;
pub mod reporter;
pub mod translate;

use thiserror::Error;

use crate::telemetry::TelemetryError;

pub use client::{build_telemetry, ForecastResponse, WeatherClient};
pub use reporter::WeatherReporter;
pub use translate::translate_condition;

/// Errors raised while producing or forwarding weather telemetry.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("weather API request failed: {0}")]
    Http(reqwest::Error),

    #[error("failed to format timestamp: {0}")]
    Format(#[from] time::error::Format),

    #[error("weather telemetry push failed: {0}")]
    Telemetry(#[from] TelemetryError),
}
