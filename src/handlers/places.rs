// src/handlers/places.rs
// DOCUMENTATION: Nearby places browsing and selection
// PURPOSE: Drive a trip detail session from the command line

use super::AppContext;
use crate::errors::TripPlannerError;
use crate::i18n::t;
use crate::models::{Language, Place, PlaceCategory};
use crate::services::{PlaceSelectionSync, PlacesStatus, SelectionChange, SelectionSnapshot};
use std::collections::BTreeSet;

/// `tripplanner places <id>`
pub async fn show_places(
    ctx: &AppContext,
    trip_id: i64,
    category: PlaceCategory,
    query: &str,
) -> Result<(), TripPlannerError> {
    let sync = PlaceSelectionSync::open(ctx.client.clone(), trip_id, ctx.settings()).await?;
    sync.load_places(category, ctx.language).await?;

    let visible = sync.visible_places(query).await;
    let snapshot = sync.snapshot().await;
    log::debug!("{} of {} places match {:?}", visible.len(), snapshot.places.len(), query);
    println!("{}", render_session_status(&snapshot, ctx.language));
    println!("{}", render_places(&visible, &snapshot.selected, ctx.language));

    sync.close();
    Ok(())
}

/// `tripplanner select <id> <xid>...`
/// DOCUMENTATION: Applies every toggle, then saves once. With auto-save the
/// session has already saved after each change
pub async fn select_places(
    ctx: &AppContext,
    trip_id: i64,
    xids: &[String],
    remove: bool,
) -> Result<(), TripPlannerError> {
    let sync = PlaceSelectionSync::open(ctx.client.clone(), trip_id, ctx.settings()).await?;
    log::debug!("Applying {} toggles to trip {}", xids.len(), sync.trip_id());

    let mut changed = false;
    for xid in xids {
        match sync.toggle_and_sync(xid, !remove).await? {
            SelectionChange::Ignored => log::warn!("Skipping empty place id"),
            change => changed |= change.changed(),
        }
    }

    if changed && !sync.settings().auto_save {
        if let Err(e) = sync.persist_selection().await {
            eprintln!("{}: {}", t(ctx.language, "selectionUnsaved"), e.user_message());
            return Err(e);
        }
    }

    let snapshot = sync.snapshot().await;
    println!(
        "{} ({}): {}",
        t(ctx.language, "placesSaved"),
        snapshot.trip.places_to_visit.len(),
        snapshot.trip.places_to_visit.join(", ")
    );
    sync.close();
    Ok(())
}

/// Header above the place list: query, fetch time and pending work
pub fn render_session_status(snapshot: &SelectionSnapshot, lang: Language) -> String {
    let mut lines = vec![format!(
        "{} ({}, {})",
        t(lang, "nearbyPlaces"),
        snapshot.category,
        snapshot.language.label()
    )];
    if snapshot.status == PlacesStatus::Loading {
        lines.push(t(lang, "loading").to_string());
    }
    if let Some(at) = snapshot.loaded_at {
        lines.push(format!("{} {}", t(lang, "loadedAt"), at.format("%Y-%m-%d %H:%M:%S UTC")));
    }
    if let Some(message) = &snapshot.load_error {
        lines.push(format!("{}: {}", t(lang, "loadFailed"), message));
    }
    if let Some(message) = &snapshot.save_error {
        lines.push(format!("{}: {}", t(lang, "selectionUnsaved"), message));
    }
    if let Some(message) = &snapshot.export_error {
        lines.push(format!("{}: {}", t(lang, "exportFailed"), message));
    }
    if snapshot.saving {
        lines.push(t(lang, "saving").to_string());
    }
    if snapshot.exporting {
        lines.push(t(lang, "exportInProgress").to_string());
    }
    lines.join("\n")
}

/// Place list with selection marks
pub fn render_places(places: &[Place], selected: &BTreeSet<String>, lang: Language) -> String {
    if places.is_empty() {
        return t(lang, "noPlaces").to_string();
    }

    let mut lines = Vec::with_capacity(places.len());
    for (index, place) in places.iter().enumerate() {
        let mark = match place.selectable_id() {
            Some(xid) if selected.contains(xid) => "[x]",
            Some(_) => "[ ]",
            None => "   ",
        };

        let mut details = Vec::new();
        if let Some(kinds) = place.kinds.as_deref().filter(|k| !k.is_empty()) {
            details.push(kinds.to_string());
        }
        if let Some(dist) = place.rounded_distance() {
            details.push(format!("{} m", dist));
        }

        let mut line = format!("{} {}", mark, place.label());
        if !details.is_empty() {
            line.push_str(&format!(" ({})", details.join(", ")));
        }
        line.push_str(&format!("  id={}", place.key(index)));
        if let Some(url) = place.wikipedia_url().or_else(|| place.details_url()) {
            line.push_str(&format!("\n      {}", url));
        }
        lines.push(line);
    }
    lines.join("\n")
}
