// src/models/place.rs
// DOCUMENTATION: Points of interest returned by the places API
// PURPOSE: Place model, category enumeration and response parsing

use crate::errors::TripPlannerError;
use geojson::GeoJson;
use serde::de::Deserializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Geographic point of a place
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacePoint {
    pub lon: f64,
    pub lat: f64,
}

/// A nearby point of interest
/// DOCUMENTATION: Ephemeral; re-fetched whenever category or language changes.
/// Every field is optional on the wire, the places provider omits freely
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Provider identifier, missing on some results
    #[serde(default)]
    pub xid: Option<String>,

    /// Default name
    #[serde(default)]
    pub name: Option<String>,

    /// Name translated into the requested language
    #[serde(default)]
    pub name_translated: Option<String>,

    /// English name
    #[serde(default)]
    pub name_en: Option<String>,

    /// Distance from the city centre in meters
    #[serde(default)]
    pub dist: Option<f64>,

    /// Comma-separated category tags
    #[serde(default)]
    pub kinds: Option<String>,

    /// Popularity score
    #[serde(default, deserialize_with = "deserialize_score")]
    pub rate: Option<f64>,

    #[serde(default, deserialize_with = "deserialize_flag")]
    pub has_wikipedia: bool,

    #[serde(default, deserialize_with = "deserialize_flag")]
    pub has_website: bool,

    #[serde(default, deserialize_with = "deserialize_flag")]
    pub has_opening_hours: bool,

    #[serde(default)]
    pub image_url: Option<String>,

    /// Wikipedia reference of the form `lang:Title`
    #[serde(default)]
    pub wikipedia: Option<String>,

    #[serde(default)]
    pub point: Option<PlacePoint>,
}

impl Place {
    /// Best available name: translated, then English, then default
    pub fn display_name(&self) -> Option<&str> {
        [&self.name_translated, &self.name_en, &self.name]
            .into_iter()
            .filter_map(|n| n.as_deref())
            .find(|n| !n.trim().is_empty())
    }

    /// Name for listings
    pub fn label(&self) -> &str {
        self.display_name().unwrap_or("Unnamed")
    }

    /// Identifier usable for selection, if any
    pub fn selectable_id(&self) -> Option<&str> {
        self.xid.as_deref().filter(|x| !x.is_empty())
    }

    /// Key for listing rows; the list index stands in when xid is missing
    pub fn key(&self, index: usize) -> String {
        self.selectable_id()
            .map(str::to_string)
            .unwrap_or_else(|| index.to_string())
    }

    pub fn rounded_distance(&self) -> Option<i64> {
        self.dist.map(|d| d.round() as i64)
    }

    /// Provider details page
    pub fn details_url(&self) -> Option<String> {
        self.selectable_id()
            .map(|xid| format!("https://opentripmap.io/en/places/{}", xid))
    }

    /// Wikipedia article URL built from the `lang:Title` reference
    pub fn wikipedia_url(&self) -> Option<String> {
        let reference = self.wikipedia.as_deref()?;
        let (lang, title) = reference.split_once(':')?;
        let (lang, title) = (lang.trim(), title.trim());
        if lang.is_empty() || title.is_empty() {
            return None;
        }
        Some(format!(
            "https://{}.wikipedia.org/wiki/{}",
            lang,
            title.replace(' ', "_")
        ))
    }
}

/// Null-tolerant boolean
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

/// Popularity arrives as a number or as a string such as "3h"
fn deserialize_score<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => {
            let digits: String = s
                .trim()
                .chars()
                .take_while(|c| c.is_ascii_digit() || *c == '.')
                .collect();
            digits.parse().ok()
        }
        _ => None,
    })
}

/// Categories offered by the places search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceCategory {
    #[default]
    All,
    Museums,
    Parks,
    Restaurants,
    Attractions,
    Historic,
}

impl PlaceCategory {
    pub const ALL: [PlaceCategory; 6] = [
        PlaceCategory::All,
        PlaceCategory::Museums,
        PlaceCategory::Parks,
        PlaceCategory::Restaurants,
        PlaceCategory::Attractions,
        PlaceCategory::Historic,
    ];

    /// Value of the `category` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaceCategory::All => "all",
            PlaceCategory::Museums => "museums",
            PlaceCategory::Parks => "parks",
            PlaceCategory::Restaurants => "restaurants",
            PlaceCategory::Attractions => "attractions",
            PlaceCategory::Historic => "historic",
        }
    }
}

impl fmt::Display for PlaceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlaceCategory {
    type Err = TripPlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().to_lowercase();
        PlaceCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == value)
            .ok_or_else(|| TripPlannerError::InvalidInput(format!("Unknown category: {}", s)))
    }
}

/// Parse a places API body
/// DOCUMENTATION: Accepts `{ "places": [...] }`, a GeoJSON FeatureCollection
/// whose feature properties carry the place fields, or a bare array
pub fn parse_places_response(body: Value) -> Result<Vec<Place>, TripPlannerError> {
    let parse_error = |e: String| TripPlannerError::NetworkFailure(format!("Parse error: {}", e));

    let wraps_places = body.get("places").map_or(false, Value::is_array);
    let is_feature_collection = body.get("features").map_or(false, Value::is_array);

    if body.is_array() {
        serde_json::from_value(body).map_err(|e| parse_error(e.to_string()))
    } else if wraps_places {
        let places = body.get("places").cloned().unwrap_or(Value::Null);
        serde_json::from_value(places).map_err(|e| parse_error(e.to_string()))
    } else if is_feature_collection {
        parse_feature_collection(body)
    } else {
        Err(parse_error("unexpected places response shape".to_string()))
    }
}

fn parse_feature_collection(body: Value) -> Result<Vec<Place>, TripPlannerError> {
    let geojson = GeoJson::from_json_value(body)
        .map_err(|e| TripPlannerError::NetworkFailure(format!("Parse error: {}", e)))?;

    let collection = match geojson {
        GeoJson::FeatureCollection(fc) => fc,
        _ => {
            return Err(TripPlannerError::NetworkFailure(
                "Parse error: expected a FeatureCollection".to_string(),
            ))
        }
    };

    collection
        .features
        .into_iter()
        .map(|feature| {
            let props = Value::Object(feature.properties.unwrap_or_default());
            let mut place: Place = serde_json::from_value(props)
                .map_err(|e| TripPlannerError::NetworkFailure(format!("Parse error: {}", e)))?;

            if place.point.is_none() {
                place.point = feature.geometry.and_then(|g| match g.value {
                    geojson::Value::Point(coords) if coords.len() >= 2 => Some(PlacePoint {
                        lon: coords[0],
                        lat: coords[1],
                    }),
                    _ => None,
                });
            }
            Ok(place)
        })
        .collect()
}
