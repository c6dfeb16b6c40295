//! Cloud telemetry subsystem.
//!
//! # Data Flow
//! ```text
//! SensorReading (device POST)
//!     + Advisory (advisory stub)
//!     → TelemetryValues (flat merge)
//!     → [TelemetryEntry { ts, values }]
//!     → client.rs (POST {base_url}/api/v1/{token}/telemetry)
//!     → PushOutcome { status, body } | TelemetryError
//! ```

pub mod client;
pub mod types;

pub use client::TelemetryClient;
pub use types::{
    now_millis, PushOutcome, SensorReading, TelemetryEntry, TelemetryError, TelemetryValues,
};
