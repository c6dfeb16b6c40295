//! ESP32 telemetry relay.
//!
//! Receives sensor readings from field devices, enriches them with crop
//! advice and forwards them to the cloud telemetry endpoint.
//!
//! ```text
//!     ESP32 ── POST /esp32-data ──▶ ┌──────────────────────────┐
//!                                   │ validate → advise → push │ ── POST /api/v1/{token}/telemetry ──▶ Cloud
//!     ESP32 ◀── pushed / error ──── └──────────────────────────┘
//!                                          ▲
//!                        weather reporter ─┘ (optional, periodic)
//! ```

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::net::TcpListener;

use esp32_relay::config::load_config;
use esp32_relay::lifecycle::{wait_for_signal, Shutdown};
use esp32_relay::observability::{logging, metrics};
use esp32_relay::{RelayError, RelayServer};

#[derive(Parser)]
#[command(name = "esp32-relay")]
#[command(about = "Relay ESP32 sensor readings to cloud telemetry", long_about = None)]
struct Cli {
    /// Path to a TOML config file. Defaults plus environment overrides are
    /// used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("esp32-relay: {}", e);
            return ExitCode::FAILURE;
        }
    };

    logging::init_logging(&config.observability);

    match run(config).await {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Relay failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: esp32_relay::RelayConfig) -> Result<(), RelayError> {
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address,
        telemetry_base_url = %config.telemetry.base_url,
        telemetry_timeout_secs = config.telemetry.timeout_secs,
        weather_enabled = config.weather.enabled,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let trigger = shutdown.clone();
    tokio::spawn(async move {
        wait_for_signal().await;
        trigger.trigger();
    });

    RelayServer::new(config)?.run(listener, shutdown).await
}
