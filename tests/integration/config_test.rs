use std::future::Future;
use std::time::Duration;

use pulse_vital::core::config::{DEFAULT_BASE_URL, DEFAULT_DEVICE_ID};
use pulse_vital::core::pairing::pair;
use pulse_vital::core::sensor::{
    PollingScheduler, ReadingFetcher, ReadingSource, SchedulerConfig, SensorReading,
};
use pulse_vital::core::Config;
use pulse_vital::{PulseError, Result};
use tempfile::TempDir;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert_eq!(config.base_url, DEFAULT_BASE_URL);
    assert_eq!(config.device_id, DEFAULT_DEVICE_ID);
}

#[test]
fn test_config_load_nonexistent_returns_default() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::load_from(&temp_dir.path().join("missing.json")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_config_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("pulse-vital").join("config.json");

    let mut config = Config::default();
    config.set_value("base-url", "http://localhost:8000").unwrap();
    config.set_value("live-interval-ms", "1500").unwrap();
    config.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded, config);
    assert_eq!(loaded.live_interval().as_millis(), 1500);
}

#[test]
fn test_config_corrupt_or_empty_returns_default() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");

    std::fs::write(&path, "").unwrap();
    assert_eq!(Config::load_from(&path).unwrap(), Config::default());

    std::fs::write(&path, "{ definitely not json").unwrap();
    assert_eq!(Config::load_from(&path).unwrap(), Config::default());
}

#[test]
fn test_pairing_is_persisted_and_scopes_fetcher() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");

    let mut config = Config::default();
    pair(&mut config, "MAX30102_002").unwrap();
    config.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    let fetcher = ReadingFetcher::from_config(&loaded).unwrap();
    assert_eq!(fetcher.device_id(), "MAX30102_002");
    assert!(fetcher
        .readings_url(20)
        .unwrap()
        .path()
        .ends_with("/sensor/readings/MAX30102_002"));
}

#[test]
fn test_config_zero_values_fall_back_to_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{"device_id": "MAX30102_001", "live_interval_ms": 0, "default_limit": 0,
            "chart_max_points": 0, "request_timeout_secs": 0}"#,
    )
    .unwrap();

    let config = Config::load_from(&path).unwrap();
    let defaults = Config::default();
    assert_eq!(config.device_id, "MAX30102_001");
    assert_eq!(config.live_interval(), defaults.live_interval());
    assert_eq!(config.default_limit, defaults.default_limit);
    assert_eq!(config.chart_max_points, defaults.chart_max_points);
    assert_eq!(config.request_timeout(), None);
}

#[tokio::test(start_paused = true)]
async fn test_zero_interval_config_still_polls() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    std::fs::write(&path, r#"{"live_interval_ms": 0}"#).unwrap();
    let config = Config::load_from(&path).unwrap();

    let scheduler = PollingScheduler::new(
        FixedSource,
        SchedulerConfig {
            interval: config.live_interval(),
            limit: config.default_limit,
        },
    )
    .unwrap();
    scheduler.start();
    tokio::time::sleep(Duration::from_secs(10)).await;
    scheduler.stop();

    assert_eq!(scheduler.fetches_started(), 4);
    assert_eq!(scheduler.state().cycle, 4);
}

#[test]
fn test_zero_interval_rejected_by_scheduler() {
    let config = SchedulerConfig {
        interval: Duration::ZERO,
        limit: 20,
    };
    assert!(matches!(
        PollingScheduler::new(FixedSource, config),
        Err(PulseError::InvalidArgument(_))
    ));
}

struct FixedSource;

impl ReadingSource for FixedSource {
    fn fetch_latest(&self, _limit: u32) -> impl Future<Output = Result<Vec<SensorReading>>> + Send {
        async { Ok(Vec::new()) }
    }
}
