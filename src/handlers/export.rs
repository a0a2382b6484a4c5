// src/handlers/export.rs
// DOCUMENTATION: PDF itinerary export
// PURPOSE: Download a trip's PDF into the export directory

use super::AppContext;
use crate::errors::TripPlannerError;
use crate::i18n::t;
use crate::services::{ExportOutcome, PlaceSelectionSync};
use std::path::PathBuf;

/// `tripplanner export <id>`
pub async fn export_trip(
    ctx: &AppContext,
    trip_id: i64,
    out_dir: Option<PathBuf>,
) -> Result<(), TripPlannerError> {
    let dir = out_dir.unwrap_or_else(|| ctx.config.export_dir.clone());
    let sync = PlaceSelectionSync::open(ctx.client.clone(), trip_id, ctx.settings()).await?;

    match sync.export_pdf(&dir).await? {
        ExportOutcome::Saved(path) => {
            println!("{} {}", t(ctx.language, "exportSaved"), path.display())
        }
        ExportOutcome::AlreadyInProgress => println!("{}", t(ctx.language, "exportInProgress")),
    }

    sync.close();
    Ok(())
}
