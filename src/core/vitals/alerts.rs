//! Alert system for vital signs.
//!
//! Evaluates the latest reading against configurable thresholds and produces
//! the alert list, status labels and the home view recommendation.

use serde::{Deserialize, Serialize};

use crate::core::sensor::{AggregateSnapshot, Metric, SensorReading};

/// Alert configuration with thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertConfig {
    pub heart_rate_low: f64,     // bpm
    pub heart_rate_high: f64,    // bpm
    pub spo2_danger: f64,        // %
    pub spo2_warning: f64,       // %
    pub fever_fahrenheit: f64,   // °F
    pub elevated_heart_avg: f64, // bpm, home recommendation
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            heart_rate_low: 45.0,
            heart_rate_high: 120.0,
            spo2_danger: 94.0,
            spo2_warning: 96.0,
            fever_fahrenheit: 100.4,
            elevated_heart_avg: 90.0,
        }
    }
}

/// An individual alert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub severity: AlertSeverity,
    pub metric: Option<Metric>,
    pub message: String,
    pub value: Option<f64>,
    pub threshold: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AlertSeverity {
    Ok,
    Warning,
    Danger,
}

/// Sentinel zeros and nulls are "no reading" and never raise an alert
fn measured(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v > 0.0)
}

/// Evaluate a reading and generate alerts.
///
/// The list is never empty: with nothing abnormal it holds a single `Ok`
/// entry.
pub fn evaluate_alerts(reading: &SensorReading, config: &AlertConfig) -> Vec<Alert> {
    let mut alerts = Vec::new();

    // Heart rate
    if let Some(hr) = measured(reading.heart_rate) {
        if hr > config.heart_rate_high || hr < config.heart_rate_low {
            alerts.push(Alert {
                severity: AlertSeverity::Danger,
                metric: Some(Metric::HeartRate),
                message: format!(
                    "Heart rate out of range ({:.0} bpm, expected {:.0}-{:.0})",
                    hr, config.heart_rate_low, config.heart_rate_high
                ),
                value: Some(hr),
                threshold: Some(if hr > config.heart_rate_high {
                    config.heart_rate_high
                } else {
                    config.heart_rate_low
                }),
            });
        }
    }

    // SpO2
    if let Some(spo2) = measured(reading.spo2) {
        if spo2 < config.spo2_danger {
            alerts.push(Alert {
                severity: AlertSeverity::Danger,
                metric: Some(Metric::Spo2),
                message: format!("Low oxygenation (SpO₂ {:.0}%)", spo2),
                value: Some(spo2),
                threshold: Some(config.spo2_danger),
            });
        } else if spo2 < config.spo2_warning {
            alerts.push(Alert {
                severity: AlertSeverity::Warning,
                metric: Some(Metric::Spo2),
                message: format!("Slightly reduced oxygenation (SpO₂ {:.0}%)", spo2),
                value: Some(spo2),
                threshold: Some(config.spo2_warning),
            });
        }
    }

    // Temperature
    if let Some(temp) = measured(reading.temperature) {
        if temp >= config.fever_fahrenheit {
            alerts.push(Alert {
                severity: AlertSeverity::Warning,
                metric: Some(Metric::Temperature),
                message: format!("Elevated temperature, possible fever ({:.1} °F)", temp),
                value: Some(temp),
                threshold: Some(config.fever_fahrenheit),
            });
        }
    }

    if alerts.is_empty() {
        alerts.push(Alert {
            severity: AlertSeverity::Ok,
            metric: None,
            message: "No anomalies detected".to_string(),
            value: None,
            threshold: None,
        });
    }

    alerts
}

/// Whether any alert in the list needs attention
pub fn has_anomaly(alerts: &[Alert]) -> bool {
    alerts.iter().any(|a| a.severity > AlertSeverity::Ok)
}

/// Short status word shown under a metric value
pub fn status_label(metric: Metric, value: Option<f64>, config: &AlertConfig) -> &'static str {
    let Some(value) = measured(value) else {
        return "No data";
    };

    match metric {
        Metric::HeartRate => {
            if value < config.heart_rate_low || value > config.heart_rate_high {
                "Out of range"
            } else {
                "Normal"
            }
        }
        Metric::Spo2 => {
            if value < config.spo2_danger {
                "Low"
            } else if value < config.spo2_warning {
                "Attention"
            } else {
                "Optimal"
            }
        }
        Metric::Temperature => {
            if value >= config.fever_fahrenheit {
                "Fever"
            } else {
                "No fever"
            }
        }
    }
}

/// One-line wellbeing advice for the home view
pub fn recommendation(snapshot: &AggregateSnapshot, had_alert: bool, config: &AlertConfig) -> &'static str {
    if had_alert {
        "Out-of-range values were detected recently. Stay alert and check your history."
    } else if snapshot.heart_rate.avg > config.elevated_heart_avg {
        "Your average heart rate is a bit high. Consider resting and staying hydrated."
    } else if snapshot.temperature.avg >= config.fever_fahrenheit {
        "Elevated temperature. Watch for fever symptoms."
    } else {
        "All stable. Your vital signs are within range."
    }
}
