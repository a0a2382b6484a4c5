// src/errors.rs
// DOCUMENTATION: Custom error types for the trip planner client
// PURPOSE: Centralized error handling for every remote call and local write

use thiserror::Error;

/// Client-specific error types
/// DOCUMENTATION: Every remote call is caught at its call site and turned
/// into one of these; none of them is fatal to the program
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TripPlannerError {
    /// Request could not be sent, timed out, or the body could not be parsed
    #[error("Network failure: {0}")]
    NetworkFailure(String),

    /// Server answered with a non-success status
    #[error("Server rejected request ({status}): {message}")]
    ServerRejection { status: u16, message: String },

    #[error("Trip not found with id: {0}")]
    NotFound(i64),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Preferences error: {0}")]
    Preferences(String),
}

impl TripPlannerError {
    /// Message shown to the user
    /// DOCUMENTATION: Server rejections show the body text only, the rest
    /// use the full display form
    pub fn user_message(&self) -> String {
        match self {
            TripPlannerError::ServerRejection { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// HTTP status for server rejections
    pub fn status(&self) -> Option<u16> {
        match self {
            TripPlannerError::ServerRejection { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for TripPlannerError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TripPlannerError::NetworkFailure(format!("Request timed out: {}", e))
        } else if e.is_decode() {
            TripPlannerError::NetworkFailure(format!("Parse error: {}", e))
        } else {
            TripPlannerError::NetworkFailure(format!("Request failed: {}", e))
        }
    }
}

impl From<std::io::Error> for TripPlannerError {
    fn from(e: std::io::Error) -> Self {
        TripPlannerError::Io(e.to_string())
    }
}

impl From<validator::ValidationErrors> for TripPlannerError {
    fn from(e: validator::ValidationErrors) -> Self {
        TripPlannerError::ValidationError(e.to_string())
    }
}
