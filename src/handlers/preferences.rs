// src/handlers/preferences.rs
// DOCUMENTATION: Color mode and language preferences
// PURPOSE: Show or change persisted preferences

use crate::config::{ColorMode, Preferences};
use crate::errors::TripPlannerError;
use crate::i18n::t;
use crate::models::Language;
use std::path::Path;

/// Requested color mode change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeChange {
    Set(ColorMode),
    Toggle,
}

/// `tripplanner color-mode [light|dark|toggle]`
pub fn color_mode(
    path: &Path,
    preferences: &mut Preferences,
    change: Option<ModeChange>,
) -> Result<(), TripPlannerError> {
    if let Some(change) = change {
        apply_mode_change(preferences, change);
        preferences.save(path)?;
    }
    println!(
        "{}: {}",
        t(preferences.language, "colorMode"),
        preferences.color_mode
    );
    Ok(())
}

fn apply_mode_change(preferences: &mut Preferences, change: ModeChange) -> ColorMode {
    match change {
        ModeChange::Set(mode) => {
            preferences.color_mode = mode;
            mode
        }
        ModeChange::Toggle => preferences.toggle_color_mode(),
    }
}

/// `tripplanner language [code]`
pub fn language(
    path: &Path,
    preferences: &mut Preferences,
    code: Option<Language>,
) -> Result<(), TripPlannerError> {
    if let Some(code) = code {
        preferences.language = code;
        preferences.save(path)?;
    }
    println!("{} ({})", preferences.language.label(), preferences.language);
    Ok(())
}
