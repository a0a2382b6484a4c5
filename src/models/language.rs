// src/models/language.rs
// DOCUMENTATION: Supported interface and places-query languages
// PURPOSE: Language code passed to the places API and the string table

use crate::errors::TripPlannerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Es,
    Cs,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::En, Language::Es, Language::Cs];

    /// Code sent as the `lang` query parameter
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
            Language::Cs => "cs",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Es => "Español",
            Language::Cs => "Česky",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = TripPlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_lowercase();
        Language::ALL
            .into_iter()
            .find(|lang| lang.code() == code)
            .ok_or_else(|| TripPlannerError::InvalidInput(format!("Unsupported language: {}", s)))
    }
}
