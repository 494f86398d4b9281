//! Local key-value persistence for the user profile and emergency contact.
//!
//! A single JSON object on disk maps string keys to serialized records.
//! No durability guarantees beyond a plain file write.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PulseError, Result};

pub const USER_KEY: &str = "@pulse_vital_user";
pub const EMERGENCY_KEY: &str = "@pulse_vital_emergency";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredUser {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergencyContact {
    pub name: String,
    pub relationship: String,
    pub phone: String,
}

/// File-backed string-keyed store
#[derive(Debug, Clone)]
pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store in the platform data directory
    pub fn open_default() -> Result<Self> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| PulseError::storage("Could not determine data directory"))?;
        Ok(Self::open(data_dir.join("pulse-vital").join("store.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let data = fs::read_to_string(&self.path)?;
        if data.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str::<Value>(&data) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) | Err(_) => {
                log::warn!("Store file {:?} is corrupted, starting empty", self.path);
                Ok(Map::new())
            }
        }
    }

    fn write_all(&self, map: &Map<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(map)?)?;
        Ok(())
    }

    pub fn get_raw(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.read_all()?.remove(key))
    }

    /// Typed read. A record that no longer matches its type reads as absent.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        Ok(self.get_raw(key)?.and_then(|value| {
            serde_json::from_value(value)
                .map_err(|e| log::warn!("Ignoring unreadable record {}: {}", key, e))
                .ok()
        }))
    }

    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let mut map = self.read_all()?;
        map.insert(key.to_string(), serde_json::to_value(value)?);
        self.write_all(&map)
    }

    /// Remove a key; returns whether it was present
    pub fn remove(&self, key: &str) -> Result<bool> {
        let mut map = self.read_all()?;
        let existed = map.remove(key).is_some();
        if existed {
            self.write_all(&map)?;
        }
        Ok(existed)
    }

    pub fn save_user(&self, user: &StoredUser) -> Result<()> {
        self.set(USER_KEY, user)
    }

    pub fn get_user(&self) -> Result<Option<StoredUser>> {
        self.get(USER_KEY)
    }

    pub fn clear_user(&self) -> Result<bool> {
        self.remove(USER_KEY)
    }

    pub fn save_emergency_contact(&self, contact: &EmergencyContact) -> Result<()> {
        self.set(EMERGENCY_KEY, contact)
    }

    pub fn get_emergency_contact(&self) -> Result<Option<EmergencyContact>> {
        self.get(EMERGENCY_KEY)
    }

    pub fn clear_emergency_contact(&self) -> Result<bool> {
        self.remove(EMERGENCY_KEY)
    }
}
