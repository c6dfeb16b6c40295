//! WeatherAPI forecast client and telemetry mapping.

use serde::Deserialize;
use serde_json::{Map, Number, Value};
use std::time::Duration;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::config::WeatherConfig;
use crate::weather::translate::translate_condition;
use crate::weather::WeatherError;

/// Number of hourly slots exported (`hour_0` .. `hour_6`).
pub const HOURLY_SLOTS: usize = 7;

/// Subset of the `forecast.json` response that the relay reads.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ForecastResponse {
    pub current: Option<Current>,
    pub forecast: Option<Forecast>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Current {
    pub last_updated: Option<String>,
    pub temp_c: Option<f64>,
    /// Kept as sent; WeatherAPI reports whole percentages.
    pub humidity: Option<Number>,
    pub condition: Option<Condition>,
}

impl Current {
    /// True when the API sent an empty `current` object.
    fn is_empty(&self) -> bool {
        self.last_updated.is_none()
            && self.temp_c.is_none()
            && self.humidity.is_none()
            && self.condition.is_none()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Condition {
    pub text: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Forecast {
    pub forecastday: Vec<ForecastDay>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ForecastDay {
    pub day: Option<DaySummary>,
    pub hour: Vec<Hour>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DaySummary {
    pub maxtemp_c: Option<f64>,
    pub mintemp_c: Option<f64>,
    pub condition: Option<Condition>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Hour {
    pub time: Option<String>,
    pub temp_c: Option<f64>,
    pub humidity: Option<Number>,
    pub condition: Option<Condition>,
}

fn condition_text(condition: &Option<Condition>) -> &str {
    condition.as_ref().map(|c| c.text.as_str()).unwrap_or("")
}

/// Fetches forecasts for one configured location.
#[derive(Clone)]
pub struct WeatherClient {
    http: reqwest::Client,
    config: WeatherConfig,
}

impl WeatherClient {
    pub fn new(config: WeatherConfig) -> Result<Self, WeatherError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WeatherError::Http(e.without_url()))?;
        Ok(Self { http, config })
    }

    /// Fetch a two-day forecast and map it to a flat telemetry record.
    pub async fn fetch(&self) -> Result<Map<String, Value>, WeatherError> {
        let url = format!(
            "{}/v1/forecast.json",
            self.config.base_url.trim_end_matches('/')
        );

        // Errors are stripped of their URL; it carries the API key.
        let response = self
            .http
            .get(url)
            .query(&[
                ("key", self.config.api_key.as_str()),
                ("q", self.config.location.as_str()),
                ("days", "2"),
                ("aqi", "no"),
                ("alerts", "no"),
            ])
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| WeatherError::Http(e.without_url()))?;

        let forecast: ForecastResponse = response
            .json()
            .await
            .map_err(|e| WeatherError::Http(e.without_url()))?;

        let time = OffsetDateTime::now_utc().format(&Rfc3339)?;
        Ok(build_telemetry(&forecast, &self.config, time))
    }

    pub fn location(&self) -> &str {
        &self.config.location
    }
}

/// Flatten a forecast into the telemetry keys the dashboard reads.
///
/// Hourly slots are filled from the current conditions followed by the
/// forecast hours in order; slots without data are `null`.
pub fn build_telemetry(
    forecast: &ForecastResponse,
    config: &WeatherConfig,
    time: String,
) -> Map<String, Value> {
    let mut telemetry = Map::new();
    let current = forecast.current.clone().unwrap_or_default();
    let current_desc = condition_text(&current.condition);

    telemetry.insert("time".into(), Value::from(time));
    telemetry.insert("location".into(), Value::from(config.location.clone()));
    telemetry.insert("temperature".into(), Value::from(current.temp_c));
    telemetry.insert("humidity".into(), Value::from(current.humidity.clone()));
    telemetry.insert("weather_desc".into(), Value::from(translate_condition(current_desc)));
    telemetry.insert("crop".into(), Value::from(config.crop.clone()));

    let days: &[ForecastDay] = forecast
        .forecast
        .as_ref()
        .map(|f| f.forecastday.as_slice())
        .unwrap_or(&[]);

    let mut hours: Vec<Hour> = Vec::new();
    if let Some(current) = forecast.current.as_ref().filter(|c| !c.is_empty()) {
        hours.push(Hour {
            time: current.last_updated.clone(),
            temp_c: current.temp_c,
            humidity: current.humidity.clone(),
            condition: Some(Condition {
                text: current_desc.to_string(),
            }),
        });
    }
    hours.extend(days.iter().flat_map(|d| d.hour.iter().cloned()));

    for i in 0..HOURLY_SLOTS {
        let (temperature, humidity, desc) = match hours.get(i) {
            Some(h) => (
                Value::from(h.temp_c),
                Value::from(h.humidity.clone()),
                Value::from(translate_condition(condition_text(&h.condition))),
            ),
            None => (Value::Null, Value::Null, Value::Null),
        };
        telemetry.insert(format!("hour_{i}_temperature"), temperature);
        telemetry.insert(format!("hour_{i}_humidity"), humidity);
        telemetry.insert(format!("hour_{i}_weather_desc"), desc);
    }

    for (prefix, day) in ["weather_today", "weather_tomorrow"].iter().zip(days) {
        let summary = day.day.clone().unwrap_or_default();
        telemetry.insert(
            format!("{prefix}_desc"),
            Value::from(translate_condition(condition_text(&summary.condition))),
        );
        telemetry.insert(format!("{prefix}_max"), Value::from(summary.maxtemp_c));
        telemetry.insert(format!("{prefix}_min"), Value::from(summary.mintemp_c));
    }

    telemetry
}
