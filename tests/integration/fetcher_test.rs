// Integration tests for the sensor readings HTTP client

use super::common::serve_once;
use pulse_vital::core::sensor::ReadingFetcher;
use pulse_vital::PulseError;

fn fetcher_for(addr: std::net::SocketAddr) -> ReadingFetcher {
    ReadingFetcher::new(&format!("http://{}", addr), "ESP32_001").unwrap()
}

#[tokio::test]
async fn test_request_path_and_limit() {
    let (addr, server) = serve_once(200, "[]").await;
    let readings = fetcher_for(addr).fetch_latest_readings(20).await.unwrap();

    assert!(readings.is_empty());
    assert_eq!(
        server.await.unwrap(),
        "GET /sensor/readings/ESP32_001?limit=20 HTTP/1.1"
    );
}

#[tokio::test]
async fn test_not_found_is_empty() {
    let (addr, _server) = serve_once(404, r#"{"detail": "Device not found"}"#).await;
    let readings = fetcher_for(addr).fetch_latest_readings(20).await.unwrap();
    assert!(readings.is_empty());
}

#[tokio::test]
async fn test_unprocessable_is_empty() {
    let (addr, _server) = serve_once(422, r#"{"detail": []}"#).await;
    let readings = fetcher_for(addr).fetch_latest_readings(5).await.unwrap();
    assert!(readings.is_empty());
}

#[tokio::test]
async fn test_server_error_carries_status() {
    let (addr, _server) = serve_once(500, "oops").await;
    let err = fetcher_for(addr).fetch_latest_readings(20).await.unwrap_err();

    assert!(matches!(err, PulseError::Server { status: 500 }));
    assert_eq!(err.status_code(), Some(500));
}

#[tokio::test]
async fn test_other_client_errors_are_errors() {
    let (addr, _server) = serve_once(401, "{}").await;
    let err = fetcher_for(addr).fetch_latest_readings(20).await.unwrap_err();
    assert_eq!(err.status_code(), Some(401));
}

#[tokio::test]
async fn test_non_array_body_is_empty() {
    let (addr, _server) = serve_once(200, r#"{"readings": []}"#).await;
    let readings = fetcher_for(addr).fetch_latest_readings(20).await.unwrap();
    assert!(readings.is_empty());
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let (addr, _server) = serve_once(200, "[{\"id\": ").await;
    let err = fetcher_for(addr).fetch_latest_readings(20).await.unwrap_err();
    assert!(matches!(err, PulseError::Parse(_)));
}

#[tokio::test]
async fn test_success_is_sorted_most_recent_first() {
    let body = r#"[
        {"id": "1", "device_id": "ESP32_001", "timestamp": "2025-10-16T10:00:00", "ir_value": 1, "red_value": 1, "heart_rate": 78, "spo2": 97, "temperature": 98.4},
        {"id": "3", "device_id": "ESP32_001", "timestamp": "2025-10-16T10:10:00", "ir_value": 1, "red_value": 1, "heart_rate": 79, "spo2": 97, "temperature": null},
        {"id": "2", "device_id": "ESP32_001", "timestamp": "2025-10-16T10:05:00", "ir_value": 1, "red_value": 1, "heart_rate": null, "spo2": 0, "temperature": 98.6}
    ]"#;
    let (addr, _server) = serve_once(200, body).await;
    let readings = fetcher_for(addr).fetch_latest_readings(3).await.unwrap();

    let ids: Vec<_> = readings.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["3", "2", "1"]);
    assert_eq!(readings[1].heart_rate, None);
}

#[tokio::test]
async fn test_zero_limit_rejected_before_request() {
    let fetcher = ReadingFetcher::new("http://127.0.0.1:9", "ESP32_001").unwrap();
    let err = fetcher.fetch_latest_readings(0).await.unwrap_err();
    assert!(matches!(err, PulseError::InvalidArgument(_)));
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = fetcher_for(addr).fetch_latest_readings(20).await.unwrap_err();
    assert!(matches!(err, PulseError::Transport(_)));
}
