// Core business logic module

pub mod account;
pub mod config;
pub mod pairing;
pub mod sensor;
pub mod store;
pub mod validation;
pub mod vitals;

// Re-export commonly used items
pub use config::Config;
pub use sensor::{PollingScheduler, ReadingFetcher, SensorReading};
pub use store::{EmergencyContact, LocalStore, StoredUser};
