//! Device pairing. Discovery is mocked with a fixed list of nearby sensors.

use anyhow::Result;

use super::config::Config;
use super::validation::validate_device_id;

pub const NEARBY_DEVICES: &[&str] = &[
    "MAX30102_001",
    "MAX30102_002",
    "PULSEVITAL_DEV_A",
    "PULSEVITAL_DEV_B",
];

/// Pick the device to pair with: a non-blank custom id wins over the selection
pub fn resolve_device_id(selected: Option<&str>, custom: Option<&str>) -> Option<String> {
    custom
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .or_else(|| selected.map(str::trim).filter(|id| !id.is_empty()))
        .map(str::to_string)
}

/// Point the configuration at a new device. Returns the previous device id.
pub fn pair(config: &mut Config, device_id: &str) -> Result<String> {
    validate_device_id(device_id)?;
    let previous = config.device_id.clone();
    config.set_device_id(device_id.trim().to_string());
    log::info!("Paired device {} (was {})", config.device_id, previous);
    Ok(previous)
}
