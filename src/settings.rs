use anyhow::{Context, Result};
use clap::Args;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::PathBuf,
    sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use crate::protocol::ProtocolConfig;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct UserSettings {
    pub protocol: ProtocolConfig,
}

/// Field-by-field changes to the saved [`ProtocolConfig`].
#[derive(Debug, Clone, Default, Args)]
pub struct ProtocolOverrides {
    /// How long each gesture is detected, in milliseconds
    #[arg(long, value_name = "MS")]
    pub detection_window_ms: Option<u64>,

    /// Pause after a recognized gesture, in milliseconds
    #[arg(long, value_name = "MS")]
    pub settle_delay_ms: Option<u64>,

    /// How long the completion notice stays up, in milliseconds
    #[arg(long, value_name = "MS")]
    pub completion_delay_ms: Option<u64>,

    /// Turn vibration cues on or off
    #[arg(long, value_name = "BOOL")]
    pub haptics: Option<bool>,

    /// Start from the defaults instead of the saved values
    #[arg(long)]
    pub reset: bool,
}

impl ProtocolOverrides {
    pub fn is_empty(&self) -> bool {
        !self.reset
            && self.detection_window_ms.is_none()
            && self.settle_delay_ms.is_none()
            && self.completion_delay_ms.is_none()
            && self.haptics.is_none()
    }

    pub fn apply(&self, base: ProtocolConfig) -> ProtocolConfig {
        let mut config = if self.reset {
            ProtocolConfig::default()
        } else {
            base
        };
        if let Some(ms) = self.detection_window_ms {
            config.detection_window_ms = ms;
        }
        if let Some(ms) = self.settle_delay_ms {
            config.settle_delay_ms = ms;
        }
        if let Some(ms) = self.completion_delay_ms {
            config.completion_delay_ms = ms;
        }
        if let Some(enabled) = self.haptics {
            config.haptics_enabled = enabled;
        }
        config
    }
}

pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<UserSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_else(|err| {
                log::warn!("Ignoring malformed settings in {}: {err}", path.display());
                UserSettings::default()
            })
        } else {
            UserSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn protocol(&self) -> ProtocolConfig {
        self.read().protocol.clone()
    }

    pub fn update_protocol(&self, config: ProtocolConfig) -> Result<()> {
        let mut guard = self.write();
        guard.protocol = config;
        self.persist(&guard)
    }

    /// Apply `overrides` and save, or just read back when there are none.
    pub fn configure(&self, overrides: &ProtocolOverrides) -> Result<ProtocolConfig> {
        if overrides.is_empty() {
            return Ok(self.protocol());
        }
        let config = overrides.apply(self.protocol());
        self.update_protocol(config.clone())?;
        log::info!("Saved protocol settings to {}", self.path.display());
        Ok(config)
    }

    fn read(&self) -> RwLockReadGuard<'_, UserSettings> {
        match self.data.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write(&self) -> RwLockWriteGuard<'_, UserSettings> {
        match self.data.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn persist(&self, data: &UserSettings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_settings_path(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "handwash_settings_{name}_{}.json",
            uuid::Uuid::new_v4()
        ));
        fs::remove_file(&path).ok();
        path
    }

    #[test]
    fn missing_file_gives_defaults() {
        let store = SettingsStore::new(temp_settings_path("missing")).unwrap();
        assert_eq!(store.protocol(), ProtocolConfig::default());
    }

    #[test]
    fn protocol_changes_survive_reload() {
        let path = temp_settings_path("roundtrip");
        let store = SettingsStore::new(path.clone()).unwrap();
        store
            .update_protocol(ProtocolConfig {
                haptics_enabled: false,
                ..ProtocolConfig::fast()
            })
            .unwrap();

        let reloaded = SettingsStore::new(path.clone()).unwrap();
        assert_eq!(reloaded.protocol().detection_window_ms, 300);
        assert!(!reloaded.protocol().haptics_enabled);
        fs::remove_file(path).ok();
    }

    #[test]
    fn configure_saves_only_what_changed() {
        let path = temp_settings_path("configure");
        let store = SettingsStore::new(path.clone()).unwrap();

        let unchanged = store.configure(&ProtocolOverrides::default()).unwrap();
        assert_eq!(unchanged, ProtocolConfig::default());
        assert!(!path.exists());

        let overrides = ProtocolOverrides {
            settle_delay_ms: Some(500),
            haptics: Some(false),
            ..ProtocolOverrides::default()
        };
        let saved = store.configure(&overrides).unwrap();
        assert_eq!(saved.settle_delay_ms, 500);
        assert_eq!(saved.detection_window_ms, 3_000);

        let reloaded = SettingsStore::new(path.clone()).unwrap();
        assert_eq!(reloaded.protocol(), saved);

        let reset = ProtocolOverrides {
            reset: true,
            ..ProtocolOverrides::default()
        };
        assert_eq!(reloaded.configure(&reset).unwrap(), ProtocolConfig::default());
        fs::remove_file(path).ok();
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let path = temp_settings_path("malformed");
        fs::write(&path, "{ not json").unwrap();
        let store = SettingsStore::new(path.clone()).unwrap();
        assert_eq!(store.protocol(), ProtocolConfig::default());
        fs::remove_file(path).ok();
    }
}
