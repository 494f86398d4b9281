// Shared helpers: a one-shot HTTP responder and reading builders

use std::net::SocketAddr;

use pulse_vital::core::sensor::SensorReading;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Serve exactly one HTTP response, returning the request line it received
pub async fn serve_once(status: u16, body: &str) -> (SocketAddr, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let body = body.to_string();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();

        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }

        let response = format!(
            "HTTP/1.1 {} Status\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();

        String::from_utf8_lossy(&request)
            .lines()
            .next()
            .unwrap_or_default()
            .to_string()
    });

    (addr, handle)
}

pub fn reading(id: &str, timestamp: &str, heart_rate: Option<f64>) -> SensorReading {
    SensorReading {
        id: id.to_string(),
        device_id: "ESP32_001".to_string(),
        timestamp: timestamp.to_string(),
        heart_rate,
        spo2: Some(97.0),
        temperature: Some(98.4),
        ir_value: 51234.0,
        red_value: 40211.0,
    }
}
