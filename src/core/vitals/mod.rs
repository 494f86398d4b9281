//! Presentation helpers built on top of the sensor data layer.
//!
//! Alerts and status labels for the live view, the live sparkline buffer,
//! and the history range selector.

pub mod alerts;
mod history;
mod range;

pub use alerts::{evaluate_alerts, has_anomaly, recommendation, status_label, Alert, AlertConfig, AlertSeverity};
pub use history::VitalsHistory;
pub use range::HistoryRange;
