//! HTTP access to the sensor readings endpoint.

use std::future::Future;
use std::time::Duration;

use reqwest::StatusCode;
use serde_json::Value;
use url::Url;

use super::normalize::normalize;
use super::reading::SensorReading;
use crate::core::config::Config;
use crate::error::{PulseError, Result};

/// Row limit used when the caller has no preference
pub const DEFAULT_LIMIT: u32 = 20;

/// Anything that can produce the latest readings of a device.
///
/// The scheduler only depends on this, so views can be driven by the HTTP
/// fetcher or by an in-memory source.
pub trait ReadingSource: Send + Sync + 'static {
    fn fetch_latest(&self, limit: u32) -> impl Future<Output = Result<Vec<SensorReading>>> + Send;
}

/// Client for `GET {base_url}/sensor/readings/{device_id}?limit={limit}`
#[derive(Debug, Clone)]
pub struct ReadingFetcher {
    client: reqwest::Client,
    base_url: Url,
    device_id: String,
}

impl ReadingFetcher {
    pub fn new(base_url: &str, device_id: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, device_id, None)
    }

    /// Build a fetcher with an optional per-request timeout
    pub fn with_timeout(
        base_url: &str,
        device_id: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| PulseError::config(format!("Invalid base URL '{}': {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(PulseError::config(format!(
                "Base URL '{}' cannot carry a path",
                base_url
            )));
        }

        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("pulse-vital/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url,
            device_id: device_id.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::with_timeout(
            &config.base_url,
            config.device_id.clone(),
            config.request_timeout(),
        )
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// Full request URL for `limit` rows
    pub fn readings_url(&self, limit: u32) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| PulseError::config("Base URL cannot carry a path"))?
            .pop_if_empty()
            .extend(["sensor", "readings", self.device_id.as_str()]);
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string());
        Ok(url)
    }

    /// Fetch up to `limit` readings, most recent first.
    ///
    /// 404 and 422 mean the device has no data and yield an empty window.
    /// Any other non-success status is a [`PulseError::Server`].
    pub async fn fetch_latest_readings(&self, limit: u32) -> Result<Vec<SensorReading>> {
        if limit == 0 {
            return Err(PulseError::invalid_argument("limit must be a positive integer"));
        }

        let url = self.readings_url(limit)?;
        log::debug!("GET {}", url);

        let response = self.client.get(url).send().await.map_err(|e| {
            log::warn!("Sensor request for {} failed: {}", self.device_id, e);
            PulseError::Transport(e)
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND || status == StatusCode::UNPROCESSABLE_ENTITY {
            log::debug!("No readings for {} (status {})", self.device_id, status.as_u16());
            return Ok(Vec::new());
        }
        if !status.is_success() {
            log::warn!("Sensor API returned status {} for {}", status, self.device_id);
            return Err(PulseError::server(status.as_u16()));
        }

        let body = response.text().await?;
        parse_readings(&body)
    }
}

impl ReadingSource for ReadingFetcher {
    fn fetch_latest(&self, limit: u32) -> impl Future<Output = Result<Vec<SensorReading>>> + Send {
        self.fetch_latest_readings(limit)
    }
}

/// Decode a response body into a normalized window.
///
/// A JSON value that is not an array is an empty window. Array items that do
/// not look like readings are skipped.
pub fn parse_readings(body: &str) -> Result<Vec<SensorReading>> {
    let value: Value = serde_json::from_str(body).map_err(|e| PulseError::parse(e.to_string()))?;

    let Value::Array(items) = value else {
        log::debug!("Sensor response is not an array, treating as empty");
        return Ok(Vec::new());
    };

    let readings = items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<SensorReading>(item) {
            Ok(reading) => Some(reading),
            Err(e) => {
                log::warn!("Skipping malformed reading: {}", e);
                None
            }
        })
        .collect();

    Ok(normalize(readings))
}
