use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// One row returned by the sensor readings endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub id: String,
    pub device_id: String,
    /// ISO-8601 string as sent by the server
    pub timestamp: String,
    #[serde(default)]
    pub heart_rate: Option<f64>,
    #[serde(default)]
    pub spo2: Option<f64>,
    #[serde(default)]
    pub temperature: Option<f64>,
    /// Raw optical channels; missing or null reads as 0
    #[serde(default, deserialize_with = "null_as_zero")]
    pub ir_value: f64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub red_value: f64,
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

/// The vital signs carried by a reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    HeartRate,
    Spo2,
    Temperature,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::HeartRate, Metric::Spo2, Metric::Temperature];

    pub fn label(&self) -> &'static str {
        match self {
            Metric::HeartRate => "Heart rate",
            Metric::Spo2 => "SpO₂",
            Metric::Temperature => "Temperature",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Metric::HeartRate => "bpm",
            Metric::Spo2 => "%",
            Metric::Temperature => "°F",
        }
    }
}

impl SensorReading {
    /// Parsed timestamp. Naive timestamps (no offset) are taken as UTC.
    pub fn parsed_timestamp(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.timestamp)
    }

    pub fn value(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::HeartRate => self.heart_rate,
            Metric::Spo2 => self.spo2,
            Metric::Temperature => self.temperature,
        }
    }
}

/// Parse an ISO-8601 timestamp as produced by the readings API.
///
/// Accepts RFC 3339 (`2025-10-16T10:21:30Z`, `+02:00` offsets) and naive
/// date-times with or without fractional seconds.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}
