//! Response bodies returned to the device.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::telemetry::TelemetryValues;

/// Body of a `POST /esp32-data` reply.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum RelayResponse {
    /// The push reached the telemetry endpoint (any HTTP status).
    Pushed {
        pushed: TelemetryValues,
        tb_status: u16,
    },
    /// Validation or transport failure.
    Failed { error: String },
}

impl RelayResponse {
    pub fn failed(error: impl Into<String>) -> Self {
        Self::Failed {
            error: error.into(),
        }
    }

    pub fn with_status(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

/// Map a body rejection to a JSON error with the framework's status
/// (400 malformed, 415 wrong content type, 422 schema mismatch, 413 too large).
pub fn rejection_response(rejection: &JsonRejection) -> Response {
    RelayResponse::failed(rejection.body_text()).with_status(rejection.status())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisory::{Advisor, StubAdvisor};
    use crate::telemetry::SensorReading;
    use serde_json::json;

    #[test]
    fn test_pushed_shape() {
        let reading = SensorReading {
            temperature: 30.0,
            humidity: 70.0,
            battery: 3.9,
        };
        let body = RelayResponse::Pushed {
            pushed: TelemetryValues::new(reading, StubAdvisor.advise(&reading)),
            tb_status: 200,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["tb_status"], json!(200));
        assert_eq!(json["pushed"]["temperature"], json!(30.0));
        assert_eq!(json.as_object().unwrap().len(), 2);
    }

    #[test]
    fn test_failed_shape() {
        let json = serde_json::to_value(RelayResponse::failed("boom")).unwrap();
        assert_eq!(json, json!({"error": "boom"}));
    }
}
