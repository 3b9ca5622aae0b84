// SPDX-License-Identifier: AGPL-3.0
// Photo Share Core - Type definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Visual theme selectable by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AppTheme {
    #[default]
    Spring,
    Sleek,
}

impl AppTheme {
    pub const ALL: [AppTheme; 2] = [AppTheme::Spring, AppTheme::Sleek];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spring => "spring",
            Self::Sleek => "sleek",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Spring => "Spring",
            Self::Sleek => "Sleek",
        }
    }
}

impl fmt::Display for AppTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppTheme {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AppError::InvalidConfig(format!("Unknown theme: {}", s)))
    }
}

/// Persisted user preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    /// Selected theme
    #[serde(default)]
    pub theme: AppTheme,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            theme: AppTheme::default(),
        }
    }
}

/// Error types for the application
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("File I/O error: {0}")]
    FileIo(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::FileIo(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = AppSettings::default();
        assert_eq!(settings.theme, AppTheme::Spring);
    }

    #[test]
    fn test_missing_theme_field_uses_default() {
        let settings: AppSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings.theme, AppTheme::Spring);

        let settings: AppSettings = serde_json::from_str(r#"{"theme":"sleek"}"#).unwrap();
        assert_eq!(settings.theme, AppTheme::Sleek);
    }

    #[test]
    fn test_theme_parse() {
        assert_eq!("Sleek".parse::<AppTheme>().unwrap(), AppTheme::Sleek);
        assert!("neon".parse::<AppTheme>().is_err());
    }
}
