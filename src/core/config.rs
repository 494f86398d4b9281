use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::sensor::{DEFAULT_LIMIT, LIVE_INTERVAL};

pub const DEFAULT_BASE_URL: &str = "https://pulse-vital-api.onrender.com";
pub const DEFAULT_DEVICE_ID: &str = "ESP32_001";
pub const DEFAULT_CHART_MAX_POINTS: usize = 60;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Device selected through the pairing flow
    #[serde(default = "default_device_id")]
    pub device_id: String,
    #[serde(default = "default_live_interval_ms")]
    pub live_interval_ms: u64,
    /// No timeout when unset (transport defaults apply)
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(default = "default_chart_max_points")]
    pub chart_max_points: usize,
    #[serde(default = "default_limit")]
    pub default_limit: u32,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_device_id() -> String {
    DEFAULT_DEVICE_ID.to_string()
}

fn default_live_interval_ms() -> u64 {
    LIVE_INTERVAL.as_millis() as u64
}

fn default_chart_max_points() -> usize {
    DEFAULT_CHART_MAX_POINTS
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            device_id: default_device_id(),
            live_interval_ms: default_live_interval_ms(),
            request_timeout_secs: None,
            chart_max_points: default_chart_max_points(),
            default_limit: default_limit(),
        }
    }
}

/// Keys accepted by `pulse config get/set`
pub const CONFIG_KEYS: &[&str] = &[
    "base-url",
    "device-id",
    "live-interval-ms",
    "request-timeout-secs",
    "chart-max-points",
    "default-limit",
];

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Config::default());
        }

        let data = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        // If the file is empty or corrupted, return default config
        if data.trim().is_empty() {
            return Ok(Config::default());
        }
        let config: Config = serde_json::from_str(&data).unwrap_or_else(|e| {
            log::warn!("Ignoring unreadable config {:?}: {}", config_path, e);
            Config::default()
        });
        Ok(config.sanitized())
    }

    /// Replace zero values that a hand-edited file can carry with defaults
    fn sanitized(mut self) -> Self {
        let defaults = Config::default();
        if self.live_interval_ms == 0 {
            log::warn!(
                "live_interval_ms must be greater than zero, using {}",
                defaults.live_interval_ms
            );
            self.live_interval_ms = defaults.live_interval_ms;
        }
        if self.default_limit == 0 {
            log::warn!(
                "default_limit must be greater than zero, using {}",
                defaults.default_limit
            );
            self.default_limit = defaults.default_limit;
        }
        if self.chart_max_points == 0 {
            log::warn!(
                "chart_max_points must be greater than zero, using {}",
                defaults.chart_max_points
            );
            self.chart_max_points = defaults.chart_max_points;
        }
        if self.request_timeout_secs == Some(0) {
            log::warn!("request_timeout_secs of 0 ignored, requests have no timeout");
            self.request_timeout_secs = None;
        }
        self
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let data = serde_json::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(config_path, data)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        Ok(())
    }

    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().with_context(|| "Could not determine config directory")?;

        Ok(config_dir.join("pulse-vital").join("config.json"))
    }

    pub fn live_interval(&self) -> Duration {
        Duration::from_millis(self.live_interval_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Pairing: switch the device every fetch is scoped to
    pub fn set_device_id(&mut self, device_id: String) {
        self.device_id = device_id;
    }

    /// Read a value by its CLI key
    pub fn get_value(&self, key: &str) -> Option<String> {
        match key {
            "base-url" => Some(self.base_url.clone()),
            "device-id" => Some(self.device_id.clone()),
            "live-interval-ms" => Some(self.live_interval_ms.to_string()),
            "request-timeout-secs" => Some(
                self.request_timeout_secs
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "none".to_string()),
            ),
            "chart-max-points" => Some(self.chart_max_points.to_string()),
            "default-limit" => Some(self.default_limit.to_string()),
            _ => None,
        }
    }

    /// Validate and assign a value by its CLI key
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        use crate::core::validation;

        let value = value.trim();
        match key {
            "base-url" => {
                validation::validate_base_url(value)?;
                self.base_url = value.trim_end_matches('/').to_string();
            }
            "device-id" => {
                validation::validate_device_id(value)?;
                self.device_id = value.to_string();
            }
            "live-interval-ms" => {
                self.live_interval_ms = parse_positive(key, value)?;
            }
            "request-timeout-secs" => {
                self.request_timeout_secs = if value.eq_ignore_ascii_case("none") {
                    None
                } else {
                    Some(parse_positive(key, value)?)
                };
            }
            "chart-max-points" => {
                self.chart_max_points = parse_positive::<usize>(key, value)?;
            }
            "default-limit" => {
                self.default_limit = parse_positive::<u32>(key, value)?;
            }
            _ => anyhow::bail!(
                "Unknown config key '{}'. Valid keys: {}",
                key,
                CONFIG_KEYS.join(", ")
            ),
        }
        Ok(())
    }
}

fn parse_positive<T>(key: &str, value: &str) -> Result<T>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    let parsed: T = value
        .parse()
        .map_err(|_| anyhow::anyhow!("'{}' is not a valid number for {}", value, key))?;
    anyhow::ensure!(parsed > T::default(), "{} must be greater than zero", key);
    Ok(parsed)
}
