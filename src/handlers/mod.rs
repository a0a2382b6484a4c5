// src/handlers/mod.rs
// DOCUMENTATION: Handlers module organization
// PURPOSE: One handler module per user workflow, sharing the application context

pub mod export;
pub mod places;
pub mod preferences;
pub mod trips;

use crate::config::Config;
use crate::errors::TripPlannerError;
use crate::i18n::t;
use crate::models::Language;
use crate::services::{SelectionSettings, TripPlannerClient};
use std::sync::Arc;

/// Shared state handed to every handler
/// DOCUMENTATION: Built once in main; handlers never read the environment
pub struct AppContext {
    pub config: Config,
    pub client: Arc<TripPlannerClient>,
    /// Output language and default places language
    pub language: Language,
}

impl AppContext {
    pub fn settings(&self) -> SelectionSettings {
        SelectionSettings::from_config(&self.config)
    }
}

/// Localized one-line description of a failed command
pub fn describe_error(err: &TripPlannerError, lang: Language) -> String {
    match err {
        TripPlannerError::NotFound(id) => format!("{} (#{})", t(lang, "tripNotFound"), id),
        other => other.user_message(),
    }
}
