// src/services/place_filter.rs
// DOCUMENTATION: Client-side place filtering
// PURPOSE: Narrow a loaded place list by free-text query

use crate::models::Place;

/// Filter places by a case-insensitive substring
/// DOCUMENTATION: A place matches when its best display name or its category
/// tags contain the query. Order is preserved; an empty query matches all
///
/// # Arguments
/// * `places` - Loaded place list
/// * `query` - Free text typed by the user
pub fn filter_places<'a>(places: &'a [Place], query: &str) -> Vec<&'a Place> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return places.iter().collect();
    }

    places
        .iter()
        .filter(|place| {
            let name_matches = place
                .display_name()
                .map_or(false, |n| n.to_lowercase().contains(&needle));
            let kinds_matches = place
                .kinds
                .as_deref()
                .map_or(false, |k| k.to_lowercase().contains(&needle));
            name_matches || kinds_matches
        })
        .collect()
}
