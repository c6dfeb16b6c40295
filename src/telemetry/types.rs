//! Reading and telemetry record types.

use serde::{Deserialize, Deserializer, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

use crate::advisory::Advisory;

/// Sensor values posted by the device.
///
/// Each field accepts a JSON number or a string holding one (`"30.5"`).
/// Anything else fails deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    #[serde(deserialize_with = "lenient_f64")]
    pub temperature: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub humidity: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub battery: f64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer) {
        Ok(NumberOrString::Number(n)) => Ok(n),
        Ok(NumberOrString::Text(s)) => match s.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(n),
            _ => Err(serde::de::Error::custom(format!(
                "invalid float value: {s:?}"
            ))),
        },
        Err(_) => Err(serde::de::Error::custom("expected a number")),
    }
}

/// Flat merge of a reading and its advisory: 3 numeric fields then 5 text
/// fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TelemetryValues {
    #[serde(flatten)]
    pub reading: SensorReading,
    #[serde(flatten)]
    pub advisory: Advisory,
}

impl TelemetryValues {
    pub fn new(reading: SensorReading, advisory: Advisory) -> Self {
        Self { reading, advisory }
    }
}

/// One timestamped telemetry sample as the cloud API expects it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TelemetryEntry<V> {
    /// Epoch milliseconds.
    pub ts: i64,
    pub values: V,
}

impl<V> TelemetryEntry<V> {
    /// Stamp values with the current wall-clock time.
    pub fn now(values: V) -> Self {
        Self {
            ts: now_millis(),
            values,
        }
    }
}

/// Current time in epoch milliseconds.
pub fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or_default()
}

/// Result of a telemetry push that reached the upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushOutcome {
    pub status: u16,
    pub body: String,
}

impl PushOutcome {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport-level failures. Non-2xx statuses are not errors.
#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("telemetry request timed out after {0} seconds")]
    Timeout(u64),

    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}
