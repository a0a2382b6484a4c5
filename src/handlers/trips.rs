// src/handlers/trips.rs
// DOCUMENTATION: Trip list, detail, creation and deletion
// PURPOSE: Parse arguments, call the trip client, print results

use super::AppContext;
use crate::errors::TripPlannerError;
use crate::i18n::t;
use crate::models::{CreateTripRequest, Language, Trip};
use tokio::io::{AsyncBufReadExt, BufReader};

const DESCRIPTION_PREVIEW: usize = 40;

/// `tripplanner trips`
pub async fn list_trips(ctx: &AppContext) -> Result<(), TripPlannerError> {
    let trips = ctx.client.list_trips().await?;
    println!("{}", render_trip_table(&trips, ctx.language));
    Ok(())
}

/// `tripplanner show <id>`
pub async fn show_trip(ctx: &AppContext, trip_id: i64) -> Result<(), TripPlannerError> {
    let trip = ctx.client.get_trip(trip_id).await?;
    println!("{}", render_trip_detail(&trip, ctx.language));
    Ok(())
}

/// `tripplanner create`
pub async fn create_trip(
    ctx: &AppContext,
    city: &str,
    days: u32,
    description: &str,
) -> Result<(), TripPlannerError> {
    let request = CreateTripRequest::new(city, days, description);
    ctx.client.create_trip(&request).await?;
    println!("{}: {}", t(ctx.language, "tripSaved"), request.city);
    Ok(())
}

/// `tripplanner delete <id>`
/// DOCUMENTATION: Asks for confirmation on stdin unless `--yes` was given
pub async fn delete_trip(
    ctx: &AppContext,
    trip_id: i64,
    assume_yes: bool,
) -> Result<(), TripPlannerError> {
    if !assume_yes && !confirm(ctx.language).await? {
        return Ok(());
    }

    ctx.client.delete_trip(trip_id).await?;
    println!("{}", t(ctx.language, "tripDeleted"));
    Ok(())
}

async fn confirm(lang: Language) -> Result<bool, TripPlannerError> {
    println!("{}", t(lang, "confirmDeleteTitle"));
    println!("{} [y/N]", t(lang, "confirmDeleteContent"));

    let mut line = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await?;
    Ok(is_affirmative(&line))
}

fn is_affirmative(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes" | "a" | "ano" | "s" | "si" | "sí"
    )
}

/// Trip list as a fixed-width table
pub fn render_trip_table(trips: &[Trip], lang: Language) -> String {
    if trips.is_empty() {
        return t(lang, "noTrips").to_string();
    }

    let mut out = format!(
        "{}\n{:>5}  {:<20}  {:>4}  {}\n",
        t(lang, "plannedTrips"),
        "ID",
        t(lang, "city"),
        t(lang, "days"),
        t(lang, "description")
    );
    for trip in trips {
        out.push_str(&format!(
            "{:>5}  {:<20}  {:>4}  {}\n",
            trip.id,
            trip.city,
            trip.days,
            preview(&trip.description)
        ));
    }
    out.trim_end().to_string()
}

/// Single-line, shortened description
fn preview(description: &str) -> String {
    let flat = description.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= DESCRIPTION_PREVIEW {
        return flat;
    }
    let cut: String = flat.chars().take(DESCRIPTION_PREVIEW - 3).collect();
    format!("{}...", cut)
}

pub fn render_trip_detail(trip: &Trip, lang: Language) -> String {
    let mut out = format!(
        "#{} {}\n{}: {}\n\n{}:\n{}\n",
        trip.id,
        trip.city,
        t(lang, "days"),
        trip.days,
        t(lang, "description"),
        trip.pretty_description()
    );

    out.push_str(&format!("\n{}:", t(lang, "placesToVisit")));
    if trip.places_to_visit.is_empty() {
        out.push_str(" -");
    }
    for xid in &trip.places_to_visit {
        out.push_str(&format!("\n  - {}", xid));
    }
    out
}
