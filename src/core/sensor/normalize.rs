//! Ordering and de-duplication of fetched readings.

use std::cmp::Reverse;
use std::collections::HashSet;

use super::reading::SensorReading;

/// Sort readings most recent first and drop repeated ids.
///
/// The sort is stable, so readings with equal timestamps keep their input
/// order. Readings whose timestamp cannot be parsed sort last. When the same
/// id appears more than once, the first occurrence in the input wins.
pub fn normalize(readings: Vec<SensorReading>) -> Vec<SensorReading> {
    let mut seen = HashSet::with_capacity(readings.len());
    let mut window: Vec<SensorReading> = readings
        .into_iter()
        .filter(|r| seen.insert(r.id.clone()))
        .collect();

    // Option<DateTime> orders None below Some, so unparseable stamps end up last
    window.sort_by_cached_key(|r| Reverse(r.parsed_timestamp()));
    window
}

/// Whether `readings` is already in window order
pub fn is_normalized(readings: &[SensorReading]) -> bool {
    readings
        .windows(2)
        .all(|pair| pair[0].parsed_timestamp() >= pair[1].parsed_timestamp())
}
