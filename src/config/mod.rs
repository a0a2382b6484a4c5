// src/config/mod.rs
// DOCUMENTATION: Configuration module organization
// PURPOSE: Re-export configuration components

pub mod env;
pub mod preferences;

pub use env::Config;
pub use preferences::{ColorMode, Preferences};
