//! Backend-persisted settings map.
//!
//! Keys are derived deterministically from human-readable slider labels so
//! load and save round-trip without key drift. The map is loaded once at
//! startup, mutated locally on every slider interaction, and only
//! transmitted back on an explicit save. Saves always carry the full map.

use std::collections::HashMap;
use std::sync::Arc;

use crate::backend::client::LobbyBackend;
use crate::services::activity_log::SharedLog;
use crate::types::errors::SettingsError;

/// Derives the canonical setting key for a label: lowercase, whitespace
/// runs collapse to a single underscore, and everything that is not
/// `[a-z0-9_]` is stripped. `"Turn Speed (s)"` becomes `"turn_speed_s"`.
pub fn setting_key(label: &str) -> String {
    let mut key = String::with_capacity(label.len());
    let mut in_whitespace = false;
    for c in label.to_lowercase().chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                key.push('_');
            }
            in_whitespace = true;
        } else {
            in_whitespace = false;
            if c.is_ascii_alphanumeric() || c == '_' {
                key.push(c);
            }
        }
    }
    key
}

/// Local working copy of the backend's numeric settings.
pub struct SettingsService {
    backend: Arc<dyn LobbyBackend>,
    log: SharedLog,
    values: HashMap<String, f64>,
}

impl SettingsService {
    pub fn new(backend: Arc<dyn LobbyBackend>, log: SharedLog) -> Self {
        Self {
            backend,
            log,
            values: HashMap::new(),
        }
    }

    /// Replaces the working copy with the backend's current map.
    pub async fn load(&mut self) -> Result<(), SettingsError> {
        self.values = self.backend.load_config().await?;
        self.log.info("Settings loaded");
        Ok(())
    }

    /// Records a slider change under the key derived from its label.
    /// Local only; nothing reaches the backend until `save`.
    pub fn set_by_label(&mut self, label: &str, value: f64) -> Result<(), SettingsError> {
        let key = setting_key(label);
        if key.is_empty() {
            return Err(SettingsError::EmptyKey(label.to_string()));
        }
        self.values.insert(key, value);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.values.get(key).copied()
    }

    pub fn values(&self) -> &HashMap<String, f64> {
        &self.values
    }

    /// Persists the full current map to the backend.
    pub async fn save(&self) -> Result<(), SettingsError> {
        self.backend.save_config(&self.values).await?;
        self.log.success("Settings saved");
        Ok(())
    }
}
