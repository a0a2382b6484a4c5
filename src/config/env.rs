// src/config/env.rs
// DOCUMENTATION: Environment variable management
// PURPOSE: Load and validate client configuration from .env files

use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Client configuration loaded from environment variables
/// DOCUMENTATION: Centralizes all configuration in one struct
/// Load with Config::from_env() at startup and pass it down explicitly
#[derive(Debug, Clone)]
pub struct Config {
    /// Trip service origin (e.g., "http://127.0.0.1:8000")
    pub api_url: String,

    /// Per-request timeout in seconds
    pub request_timeout: u64,

    /// Page size for nearby places queries (default 10)
    pub places_limit: u32,

    /// Persist the selection after every change instead of on explicit save
    pub auto_save: bool,

    /// Location of the preferences file
    pub preferences_path: PathBuf,

    /// Directory PDF exports are written to
    pub export_dir: PathBuf,

    /// Log level: debug, info, warn, error
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    /// DOCUMENTATION: Reads from .env or process environment
    /// Called once at startup
    pub fn from_env() -> Self {
        dotenv().ok();

        Config {
            api_url: env::var("TRIPPLANNER_API_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:8000".to_string()),

            request_timeout: env::var("TRIPPLANNER_REQUEST_TIMEOUT")
                .unwrap_or_else(|_| "15".to_string())
                .parse()
                .unwrap_or(15),

            places_limit: env::var("TRIPPLANNER_PLACES_LIMIT")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap_or(10),

            auto_save: env::var("TRIPPLANNER_AUTO_SAVE")
                .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),

            preferences_path: env::var("TRIPPLANNER_PREFS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_preferences_path()),

            export_dir: env::var("TRIPPLANNER_EXPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),

            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "warn".to_string()),
        }
    }

    /// Validate critical configuration
    /// DOCUMENTATION: Ensures the client can talk to the service at all
    pub fn validate(&self) -> Result<(), String> {
        if self.api_url.trim().is_empty() {
            return Err("TRIPPLANNER_API_URL is required".to_string());
        }

        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err(format!(
                "TRIPPLANNER_API_URL must be an http(s) URL, got {}",
                self.api_url
            ));
        }

        if self.request_timeout == 0 {
            return Err("TRIPPLANNER_REQUEST_TIMEOUT must be greater than zero".to_string());
        }

        if self.places_limit == 0 {
            return Err("TRIPPLANNER_PLACES_LIMIT must be greater than zero".to_string());
        }

        if self.request_timeout > 60 {
            log::warn!(
                "TRIPPLANNER_REQUEST_TIMEOUT is {}s - slow requests will block the session",
                self.request_timeout
            );
        }

        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

fn default_preferences_path() -> PathBuf {
    let home = env::var("HOME")
        .or_else(|_| env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home)
        .join(".tripplanner")
        .join("preferences.json")
}

#[cfg(test)]
impl Config {
    /// Configuration pointing at a local test backend
    pub fn for_base_url(api_url: &str) -> Self {
        Config {
            api_url: api_url.to_string(),
            request_timeout: 5,
            places_limit: 10,
            auto_save: false,
            preferences_path: std::env::temp_dir().join("tripplanner-test-prefs.json"),
            export_dir: std::env::temp_dir(),
            log_level: "debug".to_string(),
        }
    }
}
