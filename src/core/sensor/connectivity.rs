//! Device connectivity derived from the age of the latest reading.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::reading::SensorReading;

/// A device whose latest reading is at least this old is shown as offline
pub const STALENESS_THRESHOLD_MINUTES: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConnectivityStatus {
    /// No fetch has completed yet
    #[default]
    Loading,
    Connected,
    NoSignal,
}

impl ConnectivityStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ConnectivityStatus::Loading => "Loading",
            ConnectivityStatus::Connected => "Connected",
            ConnectivityStatus::NoSignal => "No signal",
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectivityStatus::Connected)
    }
}

/// Classify a device from its most recent reading.
///
/// A reading stamped in the future has a negative age and is treated as
/// connected. An unparseable timestamp counts as no signal.
pub fn classify(most_recent: Option<&SensorReading>, now: DateTime<Utc>) -> ConnectivityStatus {
    let Some(ts) = most_recent.and_then(SensorReading::parsed_timestamp) else {
        return ConnectivityStatus::NoSignal;
    };

    let age_minutes = (now - ts).num_milliseconds() as f64 / 60_000.0;
    if age_minutes < STALENESS_THRESHOLD_MINUTES {
        ConnectivityStatus::Connected
    } else {
        ConnectivityStatus::NoSignal
    }
}

/// Short "time since" label for a reading, e.g. `12s`, `4m`, `2h`, `3d`.
pub fn last_updated_ago(reading: &SensorReading, now: DateTime<Utc>) -> Option<String> {
    let ts = reading.parsed_timestamp()?;
    let secs = (now - ts).num_seconds().max(0);

    Some(if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m", secs / 60)
    } else if secs < 86_400 {
        format!("{}h", secs / 3600)
    } else {
        format!("{}d", secs / 86_400)
    })
}
