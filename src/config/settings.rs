//! Settings Module
//!
//! Persistent user preferences (`settings.json`): UI theme and the default
//! verification flags for install and batch runs.

use crate::error::{Result, SnapwizError};
use crate::ui;
use crate::utils::paths;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

pub const SETTING_KEYS: [&str; 3] = ["theme", "verify_integrity", "verify_signature"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Light => write!(f, "Light"),
            Self::Dark => write!(f, "Dark"),
        }
    }
}

/// On-disk shape; missing fields take their defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsValues {
    pub theme: Theme,
    pub verify_integrity: bool,
    pub verify_signature: bool,
}

impl Default for SettingsValues {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            verify_integrity: true,
            verify_signature: false,
        }
    }
}

/// Settings manager
pub struct Settings {
    settings_file: PathBuf,
    values: SettingsValues,
}

impl Settings {
    /// Load settings from the config directory, or defaults
    pub fn load() -> Result<Self> {
        Ok(Self::load_from(paths::settings_file()?))
    }

    /// Load from an explicit file. Unreadable or malformed files yield defaults.
    pub fn load_from(settings_file: impl Into<PathBuf>) -> Self {
        let settings_file = settings_file.into();
        let values = read_values(&settings_file).unwrap_or_else(|e| {
            ui::warning(&format!("Ignoring settings file: {}", e));
            SettingsValues::default()
        });

        Self {
            settings_file,
            values,
        }
    }

    pub fn values(&self) -> &SettingsValues {
        &self.values
    }

    /// Get a setting value
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "theme" => Some(self.values.theme.to_string()),
            "verify_integrity" => Some(self.values.verify_integrity.to_string()),
            "verify_signature" => Some(self.values.verify_signature.to_string()),
            _ => None,
        }
    }

    /// Set a setting value and save
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        validate_key(key)?;

        match key {
            "theme" => {
                self.values.theme = match value.to_lowercase().as_str() {
                    "light" => Theme::Light,
                    "dark" => Theme::Dark,
                    _ => return Err(invalid_value(key, value, &["Light", "Dark"])),
                };
            }
            "verify_integrity" => self.values.verify_integrity = parse_bool(key, value)?,
            "verify_signature" => self.values.verify_signature = parse_bool(key, value)?,
            _ => {}
        }

        self.save()
    }

    /// Reset a setting to default
    pub fn reset(&mut self, key: &str) -> Result<()> {
        validate_key(key)?;
        let defaults = SettingsValues::default();

        match key {
            "theme" => self.values.theme = defaults.theme,
            "verify_integrity" => self.values.verify_integrity = defaults.verify_integrity,
            "verify_signature" => self.values.verify_signature = defaults.verify_signature,
            _ => {}
        }

        self.save()
    }

    /// Get all settings in display order
    pub fn all(&self) -> Vec<(&'static str, String)> {
        SETTING_KEYS
            .iter()
            .filter_map(|key| self.get(key).map(|value| (*key, value)))
            .collect()
    }

    /// Save settings to file
    fn save(&self) -> Result<()> {
        if let Some(parent) = self.settings_file.parent() {
            fs::create_dir_all(parent).map_err(|e| SnapwizError::IoError {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let content = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.settings_file, content).map_err(|e| SnapwizError::IoError {
            path: self.settings_file.clone(),
            source: e,
        })?;

        Ok(())
    }
}

fn read_values(path: &Path) -> Result<SettingsValues> {
    if !path.exists() {
        return Ok(SettingsValues::default());
    }
    let content = fs::read_to_string(path).map_err(|e| SnapwizError::IoError {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(serde_json::from_str(&content)?)
}

fn validate_key(key: &str) -> Result<()> {
    if !SETTING_KEYS.contains(&key) {
        return Err(SnapwizError::ConfigError(format!(
            "Unknown setting: '{}'. Valid settings: {}",
            key,
            SETTING_KEYS.join(", ")
        )));
    }
    Ok(())
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "true" | "on" | "yes" => Ok(true),
        "false" | "off" | "no" => Ok(false),
        _ => Err(invalid_value(key, value, &["true", "false"])),
    }
}

fn invalid_value(key: &str, value: &str, valid: &[&str]) -> SnapwizError {
    SnapwizError::ConfigError(format!(
        "Invalid value for '{}': '{}'. Valid: {}",
        key,
        value,
        valid.join(", ")
    ))
}

#[cfg(test)]
mod tests;
