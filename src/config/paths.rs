//! Path management for clubwatch
//!
//! Provides XDG-compliant path resolution for configuration and data.
//!
//! ## Path Resolution Order
//!
//! 1. `CLUBWATCH_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/clubwatch` or `~/.config/clubwatch`
//! 3. Windows: `%APPDATA%\clubwatch`

use std::path::PathBuf;

use crate::error::ClubwatchError;

/// Manages all paths used by clubwatch
#[derive(Debug, Clone)]
pub struct ClubwatchPaths {
    /// Base directory for all clubwatch data
    base_dir: PathBuf,
}

impl ClubwatchPaths {
    /// Create a new ClubwatchPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, ClubwatchError> {
        let base_dir = if let Ok(custom) = std::env::var("CLUBWATCH_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create ClubwatchPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/clubwatch/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the config directory (same as base for simplicity)
    pub fn config_dir(&self) -> PathBuf {
        self.base_dir.clone()
    }

    /// Get the data directory (~/.config/clubwatch/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log_file(&self) -> PathBuf {
        self.data_dir().join("admin_logs.jsonl")
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), ClubwatchError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| ClubwatchError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| ClubwatchError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if clubwatch has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, ClubwatchError> {
    // Unix (Linux/macOS): Use XDG_CONFIG_HOME if set, otherwise ~/.config
    let config_base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").expect("HOME environment variable not set");
            PathBuf::from(home).join(".config")
        });
    Ok(config_base.join("clubwatch"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, ClubwatchError> {
    // Windows: Use APPDATA
    let appdata = std::env::var("APPDATA")
        .map_err(|_| ClubwatchError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("clubwatch"))
}
