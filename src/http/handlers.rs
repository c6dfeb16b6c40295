//! Request handlers.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, StatusCode},
    response::Response,
    Json,
};
use serde::Serialize;
use std::time::Instant;

use crate::http::request::request_id;
use crate::http::response::{rejection_response, RelayResponse};
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::telemetry::{SensorReading, TelemetryEntry, TelemetryValues};

pub const ESP32_DATA_PATH: &str = "/esp32-data";
pub const HEALTH_PATH: &str = "/health";

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Accept a device reading, enrich it with advice and push it upstream.
///
/// The body is validated before anything else runs. A push that reaches the
/// telemetry endpoint answers with its status whatever it is; a transport
/// failure answers `{"error": ..}` with 200, or 502 in strict mode.
pub async fn esp32_data(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<SensorReading>, JsonRejection>,
) -> Response {
    let start = Instant::now();
    let request_id = request_id(&headers);

    let reading = match payload {
        Ok(Json(reading)) => reading,
        Err(rejection) => {
            tracing::warn!(
                %request_id,
                status = %rejection.status(),
                error = %rejection.body_text(),
                "Rejected device reading"
            );
            metrics::record_request(ESP32_DATA_PATH, rejection.status().as_u16(), start);
            return rejection_response(&rejection);
        }
    };

    tracing::debug!(
        %request_id,
        temperature = reading.temperature,
        humidity = reading.humidity,
        battery = reading.battery,
        "Reading received"
    );

    let advisory = state.advisor.advise(&reading);
    let entry = TelemetryEntry::now(TelemetryValues::new(reading, advisory));

    let (status, body) = match state.telemetry.push(std::slice::from_ref(&entry)).await {
        Ok(outcome) => {
            metrics::record_push("device", metrics::push_outcome_label(&outcome));
            tracing::info!(%request_id, ts = entry.ts, tb_status = outcome.status, "Reading forwarded");
            tracing::debug!(%request_id, upstream_body = %outcome.body, "Telemetry endpoint reply");
            (
                StatusCode::OK,
                RelayResponse::Pushed {
                    pushed: entry.values,
                    tb_status: outcome.status,
                },
            )
        }
        Err(e) => {
            metrics::record_push("device", "transport_error");
            tracing::error!(%request_id, error = %e, "Telemetry push failed");
            let status = if state.strict_upstream_errors {
                StatusCode::BAD_GATEWAY
            } else {
                StatusCode::OK
            };
            (status, RelayResponse::failed(e.to_string()))
        }
    };

    metrics::record_request(ESP32_DATA_PATH, status.as_u16(), start);
    body.with_status(status)
}
