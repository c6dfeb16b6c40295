//! Periodic weather push.

use std::time::Duration;
use tokio::time;

use crate::lifecycle::Shutdown;
use crate::observability::metrics;
use crate::telemetry::{PushOutcome, TelemetryClient, TelemetryEntry};
use crate::weather::{WeatherClient, WeatherError};

/// Background task that fetches the forecast and forwards it as telemetry.
pub struct WeatherReporter {
    weather: WeatherClient,
    telemetry: TelemetryClient,
    interval: Duration,
}

impl WeatherReporter {
    pub fn new(weather: WeatherClient, telemetry: TelemetryClient, interval: Duration) -> Self {
        Self {
            weather,
            telemetry,
            interval,
        }
    }

    /// Run until the shutdown signal fires. The first push happens
    /// immediately.
    pub async fn run(self, shutdown: Shutdown) {
        tracing::info!(
            interval_secs = self.interval.as_secs(),
            location = %self.weather.location(),
            "Weather reporter starting"
        );

        let stop = shutdown.signalled();
        tokio::pin!(stop);

        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match self.push_once().await {
                        Ok(outcome) => tracing::info!(status = outcome.status, "Weather telemetry pushed"),
                        Err(e) => tracing::error!(error = %e, "Weather push failed"),
                    }
                }
                _ = &mut stop => {
                    tracing::info!("Weather reporter received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }

    /// Fetch once and push the result.
    pub async fn push_once(&self) -> Result<PushOutcome, WeatherError> {
        let values = self.weather.fetch().await.inspect_err(|_| {
            metrics::record_push("weather", "fetch_error");
        })?;

        match self.telemetry.push(&[TelemetryEntry::now(values)]).await {
            Ok(outcome) => {
                metrics::record_push("weather", metrics::push_outcome_label(&outcome));
                Ok(outcome)
            }
            Err(e) => {
                metrics::record_push("weather", "transport_error");
                Err(e.into())
            }
        }
    }
}
