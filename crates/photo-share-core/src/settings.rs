// SPDX-License-Identifier: AGPL-3.0
// Photo Share Core - Settings persistence
//
// The selected theme is the only durable state. It lives in a local JSON
// file; sessions, recipients and albums are never written to disk.

use crate::types::{AppError, AppSettings, AppTheme};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

const SETTINGS_FILE: &str = "settings.json";

/// In-memory cache of settings, persisted to disk on changes
pub struct SettingsStore {
    settings: RwLock<AppSettings>,
    file_path: PathBuf,
}

impl SettingsStore {
    /// Create a settings store in the platform config directory
    pub fn new() -> Result<Self, AppError> {
        Self::in_dir(&Self::default_config_dir()?)
    }

    /// Create a settings store in `dir`, loading from disk if available
    pub fn in_dir(dir: &Path) -> Result<Self, AppError> {
        fs::create_dir_all(dir)
            .map_err(|e| AppError::FileIo(format!("Failed to create config dir: {}", e)))?;

        let file_path = dir.join(SETTINGS_FILE);
        tracing::info!("Settings file path: {:?}", file_path);

        let settings = if file_path.exists() {
            tracing::info!("Loading settings from disk");
            let content = fs::read_to_string(&file_path)
                .map_err(|e| AppError::FileIo(format!("Failed to read settings: {}", e)))?;

            serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Failed to parse settings, using defaults: {}", e);
                AppSettings::default()
            })
        } else {
            tracing::info!("No settings file found, using defaults");
            AppSettings::default()
        };

        let store = Self {
            settings: RwLock::new(settings),
            file_path,
        };

        // Persist default settings if file doesn't exist
        if !store.file_path.exists() {
            tracing::info!("Creating initial settings file");
            store.persist()?;
        }

        Ok(store)
    }

    fn default_config_dir() -> Result<PathBuf, AppError> {
        directories::ProjectDirs::from("com", "photoshare", "PhotoShare")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .ok_or_else(|| AppError::FileIo("Could not determine config directory".to_string()))
    }

    /// Persist settings to disk
    fn persist(&self) -> Result<(), AppError> {
        let settings = self.settings.read().unwrap();

        let content = serde_json::to_string_pretty(&*settings)
            .map_err(|e| AppError::Serialization(format!("Failed to serialize settings: {}", e)))?;

        fs::write(&self.file_path, content)
            .map_err(|e| AppError::FileIo(format!("Failed to write settings: {}", e)))?;

        Ok(())
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Get current settings
    pub fn get(&self) -> AppSettings {
        self.settings.read().unwrap().clone()
    }

    /// Update settings and persist to disk
    pub fn update(&self, new_settings: AppSettings) -> Result<(), AppError> {
        tracing::info!("Updating settings, theme: {}", new_settings.theme);
        {
            let mut settings = self.settings.write().unwrap();
            *settings = new_settings;
        }

        let result = self.persist();
        if result.is_ok() {
            tracing::info!("Settings persisted successfully");
        } else {
            tracing::error!("Failed to persist settings: {:?}", result);
        }
        result
    }

    pub fn theme(&self) -> AppTheme {
        self.settings.read().unwrap().theme
    }

    pub fn set_theme(&self, theme: AppTheme) -> Result<(), AppError> {
        let mut settings = self.get();
        settings.theme = theme;
        self.update(settings)
    }
}
