// src/config/preferences.rs
// DOCUMENTATION: Persisted user preferences
// PURPOSE: Store color mode and language between runs

use crate::errors::TripPlannerError;
use crate::models::Language;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Light,
    Dark,
}

impl ColorMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorMode::Light => "light",
            ColorMode::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ColorMode::Light => ColorMode::Dark,
            ColorMode::Dark => ColorMode::Light,
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorMode {
    type Err = TripPlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(ColorMode::Light),
            "dark" => Ok(ColorMode::Dark),
            other => Err(TripPlannerError::InvalidInput(format!(
                "Unknown color mode: {}",
                other
            ))),
        }
    }
}

/// On-disk shape, kept loose so unknown values degrade to defaults
#[derive(Debug, Default, Deserialize)]
struct StoredPreferences {
    #[serde(rename = "color-mode")]
    color_mode: Option<String>,
    language: Option<String>,
}

/// User preferences
/// DOCUMENTATION: Mirrors the browser's local storage entries of the web client.
/// Read once at startup and handed to whoever needs it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Preferences {
    #[serde(rename = "color-mode")]
    pub color_mode: ColorMode,
    pub language: Language,
}

impl Preferences {
    /// Load preferences from disk
    /// DOCUMENTATION: A missing file or unparsable content yields defaults,
    /// only an unreadable file is an error
    pub fn load(path: &Path) -> Result<Self, TripPlannerError> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("No preferences at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(TripPlannerError::Preferences(format!(
                    "Cannot read {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        let stored: StoredPreferences = match serde_json::from_str(&raw) {
            Ok(stored) => stored,
            Err(e) => {
                log::warn!("Ignoring malformed preferences {}: {}", path.display(), e);
                StoredPreferences::default()
            }
        };

        Ok(Self {
            color_mode: stored
                .color_mode
                .and_then(|v| v.parse().ok())
                .unwrap_or_default(),
            language: stored
                .language
                .and_then(|v| v.parse().ok())
                .unwrap_or_default(),
        })
    }

    /// Write preferences to disk, creating the parent directory if needed
    pub fn save(&self, path: &Path) -> Result<(), TripPlannerError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let body = serde_json::to_string_pretty(self)
            .map_err(|e| TripPlannerError::Preferences(e.to_string()))?;
        fs::write(path, body)?;
        log::debug!("Saved preferences to {}", path.display());
        Ok(())
    }

    /// Flip between light and dark, returning the new mode
    pub fn toggle_color_mode(&mut self) -> ColorMode {
        self.color_mode = self.color_mode.toggled();
        self.color_mode
    }
}
