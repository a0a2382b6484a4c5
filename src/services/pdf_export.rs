// src/services/pdf_export.rs
// DOCUMENTATION: PDF export file handling
// PURPOSE: Deterministic export file names and all-or-nothing file writes

use crate::errors::TripPlannerError;
use crate::models::Trip;
use std::path::{Path, PathBuf};

/// File name for a trip export
/// DOCUMENTATION: `trip_<city>.pdf` with every whitespace run replaced by `_`,
/// or `trip_trip-<id>.pdf` when the city is blank
pub fn pdf_file_name(trip: &Trip) -> String {
    let base = if trip.city.trim().is_empty() {
        format!("trip-{}", trip.id)
    } else {
        trip.city.clone()
    };
    format!("trip_{}.pdf", collapse_whitespace(&base))
}

fn collapse_whitespace(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut in_run = false;
    for c in value.chars() {
        if c.is_whitespace() {
            if !in_run {
                out.push('_');
            }
            in_run = true;
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}

/// Write a downloaded document into `dir`
/// DOCUMENTATION: Bytes go to a hidden temp file that is renamed into place,
/// so a failed write never leaves a partial export behind
pub async fn write_export(
    dir: &Path,
    file_name: &str,
    bytes: &[u8],
) -> Result<PathBuf, TripPlannerError> {
    tokio::fs::create_dir_all(dir).await?;

    let target = dir.join(file_name);
    let partial = dir.join(format!(".{}.part", file_name));

    if let Err(e) = tokio::fs::write(&partial, bytes).await {
        let _ = tokio::fs::remove_file(&partial).await;
        log::error!("Failed to write {}: {}", partial.display(), e);
        return Err(e.into());
    }

    if let Err(e) = tokio::fs::rename(&partial, &target).await {
        let _ = tokio::fs::remove_file(&partial).await;
        log::error!("Failed to move export to {}: {}", target.display(), e);
        return Err(e.into());
    }

    log::info!("Wrote {} bytes to {}", bytes.len(), target.display());
    Ok(target)
}
