use chrono::Local;
use colored::{ColoredString, Colorize};

use crate::core::sensor::{ConnectivityStatus, Metric, SensorReading};
use crate::core::vitals::AlertSeverity;

const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Format a metric value with its unit, or a dash when absent
pub fn format_value(metric: Metric, value: Option<f64>) -> String {
    match value.filter(|v| *v > 0.0) {
        None => "--".to_string(),
        Some(v) => match metric {
            Metric::HeartRate => format!("{:.0} {}", v, metric.unit()),
            Metric::Spo2 => format!("{:.0}{}", v, metric.unit()),
            Metric::Temperature => format!("{:.1} {}", v, metric.unit()),
        },
    }
}

/// Chart axis label (HH:MM, local time)
pub fn short_time(reading: &SensorReading) -> String {
    reading
        .parsed_timestamp()
        .map(|ts| ts.with_timezone(&Local).format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string())
}

/// Render a series as a one-line block sparkline
pub fn sparkline(values: &[f64]) -> String {
    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    if values.is_empty() {
        return String::new();
    }

    let span = max - min;
    values
        .iter()
        .map(|&v| {
            if span <= f64::EPSILON {
                SPARK_LEVELS[SPARK_LEVELS.len() / 2]
            } else {
                let idx = ((v - min) / span * (SPARK_LEVELS.len() - 1) as f64).round() as usize;
                SPARK_LEVELS[idx.min(SPARK_LEVELS.len() - 1)]
            }
        })
        .collect()
}

/// "went up +1.2" / "went down -0.4" / "no change"
pub fn trend_label(delta: f64) -> String {
    if delta == 0.0 {
        "no change".to_string()
    } else if delta > 0.0 {
        format!("went up +{}", delta)
    } else {
        format!("went down {}", delta)
    }
}

pub fn status_colored(status: ConnectivityStatus) -> ColoredString {
    match status {
        ConnectivityStatus::Connected => status.label().green().bold(),
        ConnectivityStatus::NoSignal => status.label().red().bold(),
        ConnectivityStatus::Loading => status.label().dimmed(),
    }
}

pub fn severity_colored(severity: AlertSeverity, text: &str) -> ColoredString {
    match severity {
        AlertSeverity::Ok => text.green(),
        AlertSeverity::Warning => text.yellow(),
        AlertSeverity::Danger => text.red().bold(),
    }
}
