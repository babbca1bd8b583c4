//! Dashboard settings with injected persistence
//!
//! The theme is an explicit value handed to the presentation layer at
//! startup, and persistence goes through a key-value trait the embedder
//! supplies. Nothing here mutates global state.

use crate::error::SettingsError;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Color theme for the dashboard shell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// The dashboard ships dark
    #[default]
    Dark,
    Light,
}

/// Explicit settings handed to the presentation layer at initialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DashboardSettings {
    pub theme: Theme,
}

/// Key-value persistence behind the settings
pub trait SettingsStore: Send + Sync {
    /// Loads the persisted settings, `None` when nothing was saved yet.
    fn load(&self) -> Result<Option<DashboardSettings>, SettingsError>;

    /// Persists the settings.
    fn save(&self, settings: &DashboardSettings) -> Result<(), SettingsError>;
}

/// In-memory store, the default when no persistence is wired in
#[derive(Default)]
pub struct MemorySettingsStore {
    slot: Mutex<Option<String>>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemorySettingsStore {
    fn load(&self) -> Result<Option<DashboardSettings>, SettingsError> {
        let slot = self
            .slot
            .lock()
            .map_err(|_| SettingsError::Backend("settings lock poisoned".to_string()))?;
        match slot.as_deref() {
            Some(raw) => serde_json::from_str(raw)
                .map(Some)
                .map_err(|e| SettingsError::Corrupt(e.to_string())),
            None => Ok(None),
        }
    }

    fn save(&self, settings: &DashboardSettings) -> Result<(), SettingsError> {
        let raw = serde_json::to_string(settings)
            .map_err(|e| SettingsError::Corrupt(e.to_string()))?;
        *self
            .slot
            .lock()
            .map_err(|_| SettingsError::Backend("settings lock poisoned".to_string()))? = Some(raw);
        Ok(())
    }
}

/// Loads settings, falling back to the defaults when nothing is
/// persisted yet.
pub fn load_or_default(store: &dyn SettingsStore) -> Result<DashboardSettings, SettingsError> {
    Ok(store.load()?.unwrap_or_default())
}
