//! User settings for clubwatch
//!
//! Manages the notification recipient list and dispatch limits. The recipient
//! list is deliberately hand-maintained: announcement notifications go to a
//! small, fixed set of operators, not to arbitrary subscribers.

use serde::{Deserialize, Serialize};

use super::paths::ClubwatchPaths;
use crate::error::ClubwatchError;

/// Announcement notification settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSettings {
    /// Whether announcement emails are dispatched at all
    #[serde(default)]
    pub enabled: bool,

    /// Hand-maintained recipient list
    #[serde(default)]
    pub recipients: Vec<String>,

    /// Maximum number of sends in flight at once
    #[serde(default = "default_max_parallel_sends")]
    pub max_parallel_sends: usize,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            recipients: Vec::new(),
            max_parallel_sends: default_max_parallel_sends(),
        }
    }
}

/// User settings for clubwatch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Announcement notification settings
    #[serde(default)]
    pub notifications: NotificationSettings,
}

fn default_schema_version() -> u32 {
    1
}

fn default_max_parallel_sends() -> usize {
    4
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            notifications: NotificationSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &ClubwatchPaths) -> Result<Self, ClubwatchError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| ClubwatchError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                ClubwatchError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ClubwatchPaths) -> Result<(), ClubwatchError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ClubwatchError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| ClubwatchError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
