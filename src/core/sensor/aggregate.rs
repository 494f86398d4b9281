//! Window statistics for the vitals views.
//!
//! The sensor reports `0` or `null` when it has no reading. Those sentinels
//! are left out of the average and the minimum. The maximum is taken over
//! every value with `null` counted as `0`, which can only matter when a window
//! holds no positive value at all.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::connectivity::{classify, last_updated_ago, ConnectivityStatus};
use super::reading::{Metric, SensorReading};

/// avg / min / max / last of one metric over a window
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Aggregate {
    pub avg: f64,
    pub min: f64,
    pub max: f64,
    /// Raw value of the most recent reading
    pub last: Option<f64>,
}

/// Derived view of one poll cycle. Recomputed every cycle, never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateSnapshot {
    pub heart_rate: Aggregate,
    pub spo2: Aggregate,
    pub temperature: Aggregate,
    pub connectivity: ConnectivityStatus,
    pub last_updated_ago: Option<String>,
    pub sample_count: usize,
}

impl AggregateSnapshot {
    pub fn metric(&self, metric: Metric) -> &Aggregate {
        match metric {
            Metric::HeartRate => &self.heart_rate,
            Metric::Spo2 => &self.spo2,
            Metric::Temperature => &self.temperature,
        }
    }
}

/// Aggregate a series ordered most recent first.
pub fn aggregate(values: &[Option<f64>]) -> Aggregate {
    let valid: Vec<f64> = values.iter().flatten().copied().filter(|v| *v > 0.0).collect();

    let avg = if valid.is_empty() {
        0.0
    } else {
        round1(valid.iter().sum::<f64>() / valid.len() as f64)
    };
    let min = valid.iter().copied().reduce(f64::min).unwrap_or(0.0);
    let max = values
        .iter()
        .map(|v| v.unwrap_or(0.0))
        .reduce(f64::max)
        .unwrap_or(0.0);

    Aggregate {
        avg,
        min,
        max,
        last: values.first().copied().flatten(),
    }
}

/// Values of `metric` in window order
pub fn series(window: &[SensorReading], metric: Metric) -> Vec<Option<f64>> {
    window.iter().map(|r| r.value(metric)).collect()
}

/// Aggregate every metric of a normalized window.
///
/// Always pass the full window here, not a downsampled chart series.
pub fn summarize(window: &[SensorReading], now: DateTime<Utc>) -> AggregateSnapshot {
    let latest = window.first();
    AggregateSnapshot {
        heart_rate: aggregate(&series(window, Metric::HeartRate)),
        spo2: aggregate(&series(window, Metric::Spo2)),
        temperature: aggregate(&series(window, Metric::Temperature)),
        connectivity: classify(latest, now),
        last_updated_ago: latest.and_then(|r| last_updated_ago(r, now)),
        sample_count: window.len(),
    }
}

/// Change between the first and last point of a chronological series
pub fn trend_delta(chronological: &[f64]) -> f64 {
    match (chronological.first(), chronological.last()) {
        (Some(first), Some(last)) => round1(last - first),
        _ => 0.0,
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
