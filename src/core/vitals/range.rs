use std::fmt;
use std::str::FromStr;

use crate::error::PulseError;

/// Time range selectable in the history view.
///
/// The readings endpoint only takes a row limit, so each range maps to the
/// number of rows that covers it at the sensor's upload rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryRange {
    Today,
    Week,
    Month,
    Custom(u32),
}

impl HistoryRange {
    pub fn limit(&self) -> u32 {
        match self {
            HistoryRange::Today => 300,
            HistoryRange::Week => 2_000,
            HistoryRange::Month => 10_000,
            HistoryRange::Custom(limit) => *limit,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HistoryRange::Today => "Last hours",
            HistoryRange::Week => "Last 7 days",
            HistoryRange::Month => "Last 30 days",
            HistoryRange::Custom(_) => "Custom range",
        }
    }

    /// Parse a range name, `custom` taking its row limit separately
    pub fn parse(name: &str, custom_limit: Option<u32>) -> Result<Self, PulseError> {
        match name.trim().to_lowercase().as_str() {
            "today" => Ok(HistoryRange::Today),
            "7d" | "week" => Ok(HistoryRange::Week),
            "30d" | "month" => Ok(HistoryRange::Month),
            "custom" => match custom_limit {
                Some(limit) if limit > 0 => Ok(HistoryRange::Custom(limit)),
                _ => Err(PulseError::invalid_argument(
                    "custom range needs a positive --limit",
                )),
            },
            other => Err(PulseError::invalid_argument(format!(
                "unknown range '{}' (expected today, 7d, 30d or custom)",
                other
            ))),
        }
    }
}

impl FromStr for HistoryRange {
    type Err = PulseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, None)
    }
}

impl fmt::Display for HistoryRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryRange::Custom(limit) => write!(f, "{} ({} readings)", self.label(), limit),
            _ => write!(f, "{}", self.label()),
        }
    }
}
