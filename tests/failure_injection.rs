//! Failure injection tests for the telemetry push.

use serde_json::{json, Value};
use std::time::{Duration, Instant};

mod common;

fn reading() -> Value {
    json!({"temperature": 30.0, "humidity": 70.0, "battery": 3.9})
}

#[tokio::test]
async fn test_upstream_timeout_reports_error_with_200() {
    let upstream = common::start_mock_telemetry(200, Duration::from_secs(3)).await;
    let (relay_addr, shutdown) = common::start_relay(common::relay_config(&upstream.base_url())).await;

    let started = Instant::now();
    let res = common::http_client()
        .post(format!("http://{}/esp32-data", relay_addr))
        .json(&reading())
        .send()
        .await
        .expect("relay unreachable");

    assert_eq!(res.status(), 200);
    assert!(started.elapsed() < Duration::from_secs(3), "push should give up after 1s");

    let body: Value = res.json().await.unwrap();
    let obj = body.as_object().unwrap();
    assert_eq!(obj.len(), 1, "only the error field is returned: {body}");
    assert!(body["error"].as_str().unwrap().contains("timed out"));

    shutdown.trigger();
}

#[tokio::test]
async fn test_connection_refused_reports_error_with_200() {
    let dead = common::unused_addr().await;
    let (relay_addr, shutdown) =
        common::start_relay(common::relay_config(&format!("http://{}", dead))).await;

    let res = common::http_client()
        .post(format!("http://{}/esp32-data", relay_addr))
        .json(&reading())
        .send()
        .await
        .expect("relay unreachable");

    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    let error = body["error"].as_str().unwrap();
    assert!(!error.is_empty());
    assert!(!error.contains(common::DEVICE_TOKEN), "error must not leak the token");

    shutdown.trigger();
}

#[tokio::test]
async fn test_strict_mode_returns_bad_gateway() {
    let dead = common::unused_addr().await;
    let mut config = common::relay_config(&format!("http://{}", dead));
    config.telemetry.strict_upstream_errors = true;
    let (relay_addr, shutdown) = common::start_relay(config).await;

    let res = common::http_client()
        .post(format!("http://{}/esp32-data", relay_addr))
        .json(&reading())
        .send()
        .await
        .expect("relay unreachable");

    assert_eq!(res.status(), 502);
    let body: Value = res.json().await.unwrap();
    assert!(body["error"].is_string());

    shutdown.trigger();
}

#[tokio::test]
async fn test_upstream_server_error_is_not_a_failure() {
    let upstream = common::start_mock_telemetry(503, Duration::ZERO).await;
    let mut config = common::relay_config(&upstream.base_url());
    config.telemetry.strict_upstream_errors = true;
    let (relay_addr, shutdown) = common::start_relay(config).await;

    let res = common::http_client()
        .post(format!("http://{}/esp32-data", relay_addr))
        .json(&reading())
        .send()
        .await
        .expect("relay unreachable");

    // A response from the endpoint counts as forwarded even in strict mode.
    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["tb_status"], json!(503));
    assert_eq!(upstream.received().len(), 1);

    shutdown.trigger();
}

#[tokio::test]
async fn test_no_retry_after_failure() {
    let upstream = common::start_mock_telemetry(200, Duration::from_secs(2)).await;
    let (relay_addr, shutdown) = common::start_relay(common::relay_config(&upstream.base_url())).await;

    let _ = common::http_client()
        .post(format!("http://{}/esp32-data", relay_addr))
        .json(&reading())
        .send()
        .await
        .expect("relay unreachable");

    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_eq!(upstream.received().len(), 1);

    shutdown.trigger();
}
