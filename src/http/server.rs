//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the device and health handlers
//! - Wire up middleware (request id, tracing, timeout, body limit)
//! - Spawn the weather reporter when enabled
//! - Serve until the shutdown signal fires

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::advisory::{Advisor, StubAdvisor};
use crate::config::RelayConfig;
use crate::error::RelayError;
use crate::http::handlers::{esp32_data, health, ESP32_DATA_PATH, HEALTH_PATH};
use crate::http::request::{MakeRequestUuidV4, X_REQUEST_ID};
use crate::lifecycle::Shutdown;
use crate::telemetry::TelemetryClient;
use crate::weather::{WeatherClient, WeatherReporter};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub advisor: Arc<dyn Advisor>,
    pub telemetry: TelemetryClient,
    pub strict_upstream_errors: bool,
}

/// HTTP server for the relay.
pub struct RelayServer {
    router: Router,
    config: RelayConfig,
    telemetry: TelemetryClient,
}

impl RelayServer {
    /// Create a server that enriches readings with the stub advisor.
    pub fn new(config: RelayConfig) -> Result<Self, RelayError> {
        Self::with_advisor(config, Arc::new(StubAdvisor))
    }

    /// Create a server with a custom advisor.
    pub fn with_advisor(
        config: RelayConfig,
        advisor: Arc<dyn Advisor>,
    ) -> Result<Self, RelayError> {
        let telemetry = TelemetryClient::new(&config.telemetry)?;

        let state = AppState {
            advisor,
            telemetry: telemetry.clone(),
            strict_upstream_errors: config.telemetry.strict_upstream_errors,
        };

        let router = Self::build_router(&config, state);
        Ok(Self {
            router,
            config,
            telemetry,
        })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &RelayConfig, state: AppState) -> Router {
        Router::new()
            .route(ESP32_DATA_PATH, post(esp32_data))
            .route(HEALTH_PATH, get(health))
            .with_state(state)
            // Enforced by the body extractor so oversize bodies get a JSON error.
            .layer(DefaultBodyLimit::max(config.security.max_body_size))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(
                TraceLayer::new_for_http().make_span_with(|req: &axum::http::Request<_>| {
                    let request_id = req
                        .headers()
                        .get(X_REQUEST_ID)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("-");
                    tracing::info_span!(
                        "http",
                        %request_id,
                        method = %req.method(),
                        uri = %req.uri().path(),
                    )
                }),
            )
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
    }

    /// Router with state and middleware applied, for in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener, shutdown: Shutdown) -> Result<(), RelayError> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        if self.config.weather.enabled {
            let reporter = WeatherReporter::new(
                WeatherClient::new(self.config.weather.clone())?,
                self.telemetry.clone(),
                Duration::from_secs(self.config.weather.interval_secs),
            );
            let reporter_shutdown = shutdown.clone();
            tokio::spawn(async move {
                reporter.run(reporter_shutdown).await;
            });
        } else {
            tracing::info!("Weather reporter disabled");
        }

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown.signalled())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
