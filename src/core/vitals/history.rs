use std::collections::VecDeque;

use crate::core::sensor::SensorReading;

const DEFAULT_HISTORY_SIZE: usize = 12;

/// Circular buffer of the live stream (for the pulse sparkline)
#[derive(Debug, Clone)]
pub struct VitalsHistory {
    capacity: usize,
    last_id: Option<String>,
    pub heart_rate: VecDeque<f64>,
    pub spo2: VecDeque<f64>,
    pub temperature: VecDeque<f64>,
}

impl VitalsHistory {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_SIZE)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            last_id: None,
            heart_rate: VecDeque::with_capacity(capacity),
            spo2: VecDeque::with_capacity(capacity),
            temperature: VecDeque::with_capacity(capacity),
        }
    }

    /// Record the latest reading of a poll cycle.
    ///
    /// Polls that return the same latest reading again are ignored, so the
    /// buffer holds one point per reading rather than one per tick. Missing
    /// values are skipped per metric. Returns whether anything was recorded.
    pub fn record(&mut self, reading: &SensorReading) -> bool {
        if self.last_id.as_deref() == Some(reading.id.as_str()) {
            return false;
        }
        self.last_id = Some(reading.id.clone());

        let capacity = self.capacity;
        if let Some(v) = reading.heart_rate.filter(|v| *v > 0.0) {
            Self::push_value(&mut self.heart_rate, v, capacity);
        }
        if let Some(v) = reading.spo2.filter(|v| *v > 0.0) {
            Self::push_value(&mut self.spo2, v, capacity);
        }
        if let Some(v) = reading.temperature.filter(|v| *v > 0.0) {
            Self::push_value(&mut self.temperature, v, capacity);
        }
        true
    }

    fn push_value<T>(queue: &mut VecDeque<T>, value: T, capacity: usize) {
        if queue.len() >= capacity {
            queue.pop_front();
        }
        queue.push_back(value);
    }

    /// Heart rate points oldest first
    pub fn heart_rate_series(&self) -> Vec<f64> {
        self.heart_rate.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.heart_rate.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heart_rate.is_empty()
    }
}

impl Default for VitalsHistory {
    fn default() -> Self {
        Self::new()
    }
}
