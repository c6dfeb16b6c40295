//! Shared utilities for integration testing.

#![allow(dead_code)]

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

use esp32_relay::{RelayConfig, RelayServer, Shutdown};

pub const DEVICE_TOKEN: &str = "test-device-token";

/// A push captured by the mock telemetry endpoint.
#[derive(Debug, Clone)]
pub struct Captured {
    pub token: String,
    pub body: Value,
}

#[derive(Clone)]
struct TelemetryState {
    status: StatusCode,
    delay: Duration,
    received: Arc<Mutex<Vec<Captured>>>,
}

/// Mock cloud telemetry endpoint.
pub struct MockTelemetry {
    pub addr: SocketAddr,
    received: Arc<Mutex<Vec<Captured>>>,
}

impl MockTelemetry {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn received(&self) -> Vec<Captured> {
        self.received.lock().unwrap().clone()
    }
}

async fn capture_telemetry(
    State(state): State<TelemetryState>,
    Path(token): Path<String>,
    Json(body): Json<Value>,
) -> (StatusCode, &'static str) {
    state.received.lock().unwrap().push(Captured { token, body });
    tokio::time::sleep(state.delay).await;
    (state.status, "")
}

/// Start a telemetry endpoint that records each push, waits `delay`, then
/// answers with `status`.
pub async fn start_mock_telemetry(status: u16, delay: Duration) -> MockTelemetry {
    let received = Arc::new(Mutex::new(Vec::new()));
    let state = TelemetryState {
        status: StatusCode::from_u16(status).unwrap(),
        delay,
        received: received.clone(),
    };
    let app = Router::new()
        .route("/api/v1/{token}/telemetry", post(capture_telemetry))
        .with_state(state);

    let addr = serve(app).await;
    MockTelemetry { addr, received }
}

#[derive(Clone)]
struct WeatherState {
    status: StatusCode,
    body: Value,
    queries: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

async fn forecast(
    State(state): State<WeatherState>,
    Query(query): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    state.queries.lock().unwrap().push(query);
    (state.status, Json(state.body.clone()))
}

/// Mock WeatherAPI serving `body` from `/v1/forecast.json`.
pub struct MockWeather {
    pub addr: SocketAddr,
    queries: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

impl MockWeather {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn queries(&self) -> Vec<HashMap<String, String>> {
        self.queries.lock().unwrap().clone()
    }
}

pub async fn start_mock_weather(status: u16, body: Value) -> MockWeather {
    let queries = Arc::new(Mutex::new(Vec::new()));
    let state = WeatherState {
        status: StatusCode::from_u16(status).unwrap(),
        body,
        queries: queries.clone(),
    };
    let app = Router::new()
        .route("/v1/forecast.json", get(forecast))
        .with_state(state);

    let addr = serve(app).await;
    MockWeather { addr, queries }
}

async fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

/// A local address with nothing listening on it.
pub async fn unused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

/// Relay config pointing at `telemetry_base_url` with a 1s push timeout.
pub fn relay_config(telemetry_base_url: &str) -> RelayConfig {
    let mut config = RelayConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.telemetry.base_url = telemetry_base_url.to_string();
    config.telemetry.device_token = DEVICE_TOKEN.to_string();
    config.telemetry.timeout_secs = 1;
    config
}

/// Start the relay on an ephemeral port.
pub async fn start_relay(config: RelayConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let server = RelayServer::new(config).unwrap();
    let server_shutdown = shutdown.clone();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

/// Wait until `check` passes or `timeout` elapses.
pub async fn eventually<F: Fn() -> bool>(timeout: Duration, check: F) -> bool {
    let deadline = tokio::time::Instant::now() + timeout;
    while tokio::time::Instant::now() < deadline {
        if check() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    check()
}
