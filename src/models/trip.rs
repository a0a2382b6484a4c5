// src/models/trip.rs
// DOCUMENTATION: Trip records exchanged with the trip service
// PURPOSE: Serialization models for trip listing, creation and place updates

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Represents a trip as returned by GET /trips
/// DOCUMENTATION: Owned by the backend; the client only holds a read-through copy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    /// Server-assigned identifier
    pub id: i64,

    /// Destination city (free text)
    pub city: String,

    /// Trip length in days
    pub days: u32,

    /// Free text, sometimes a JSON-encoded itinerary
    #[serde(default, alias = "itinerary")]
    pub description: String,

    /// Identifiers of places the user intends to visit
    /// Accepts an array, null, a missing key, or a JSON-encoded string
    #[serde(
        rename = "placesToVisit",
        alias = "places_to_visit",
        default,
        deserialize_with = "deserialize_places_to_visit"
    )]
    pub places_to_visit: Vec<String>,
}

impl Trip {
    /// Description for display
    /// DOCUMENTATION: JSON descriptions are pretty-printed, anything else is returned as-is
    pub fn pretty_description(&self) -> String {
        match serde_json::from_str::<serde_json::Value>(&self.description) {
            Ok(value) => {
                serde_json::to_string_pretty(&value).unwrap_or_else(|_| self.description.clone())
            }
            Err(_) => self.description.clone(),
        }
    }
}

fn deserialize_places_to_visit<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawPlaces {
        List(Vec<String>),
        Encoded(String),
    }

    match Option::<RawPlaces>::deserialize(deserializer)? {
        None => Ok(Vec::new()),
        Some(RawPlaces::List(list)) => Ok(list),
        Some(RawPlaces::Encoded(raw)) if raw.trim().is_empty() => Ok(Vec::new()),
        Some(RawPlaces::Encoded(raw)) => {
            let parsed: Option<Vec<String>> = serde_json::from_str(&raw).map_err(|e| {
                de::Error::custom(format!("invalid placesToVisit string: {}", e))
            })?;
            Ok(parsed.unwrap_or_default())
        }
    }
}

/// Request DTO for POST /save_trip
/// DOCUMENTATION: Validated before sending, the service is not relied on for it
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTripRequest {
    #[validate(length(min = 1, max = 255))]
    pub city: String,

    #[validate(range(min = 1, max = 365))]
    pub days: u32,

    pub description: String,
}

impl CreateTripRequest {
    pub fn new(city: &str, days: u32, description: &str) -> Self {
        Self {
            city: city.trim().to_string(),
            days,
            description: description.to_string(),
        }
    }
}

/// Body of PATCH /trips/{id}/places
/// DOCUMENTATION: Always the full selection, the service treats it as a replace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdatePlacesRequest {
    pub places: Vec<String>,
}
