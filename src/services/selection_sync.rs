// src/services/selection_sync.rs
// DOCUMENTATION: Trip detail session - nearby places, selection and sync
// PURPOSE: Drive places queries, track the checked set and reconcile it with the trip service

use crate::config::Config;
use crate::errors::TripPlannerError;
use crate::models::{Language, Place, PlaceCategory, Trip};
use crate::services::{filter_places, pdf_file_name, write_export, TripPlannerClient};
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{watch, RwLock};

/// Read-only settings handed to a session
#[derive(Debug, Clone, Copy)]
pub struct SelectionSettings {
    /// Page size of places queries
    pub places_limit: u32,
    /// Persist after every user-driven change
    pub auto_save: bool,
}

impl SelectionSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            places_limit: config.places_limit,
            auto_save: config.auto_save,
        }
    }
}

impl Default for SelectionSettings {
    fn default() -> Self {
        Self {
            places_limit: 10,
            auto_save: false,
        }
    }
}

/// State of the place list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacesStatus {
    /// No load has been issued yet
    NotLoaded,
    /// A load is in flight; the previous list (if any) is still shown
    Loading,
    /// The latest load succeeded, possibly with zero places
    Ready,
    /// The latest load failed; the previous list is kept
    Failed,
}

/// What happened to a load once its response arrived
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied { count: usize },
    /// A newer load was issued before this one resolved
    Superseded,
    /// The session was closed
    Abandoned,
}

/// Result of a toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    Added,
    Removed,
    Unchanged,
    /// The place has no identifier and cannot be selected
    Ignored,
}

impl SelectionChange {
    pub fn changed(&self) -> bool {
        matches!(self, SelectionChange::Added | SelectionChange::Removed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Saved(PathBuf),
    /// Another export of this trip is still running
    AlreadyInProgress,
}

/// Point-in-time view of a session for rendering
#[derive(Debug, Clone)]
pub struct SelectionSnapshot {
    pub trip: Trip,
    pub places: Vec<Place>,
    pub status: PlacesStatus,
    pub category: PlaceCategory,
    pub language: Language,
    pub selected: BTreeSet<String>,
    pub load_error: Option<String>,
    /// Last failed save, cleared only by a successful save
    pub save_error: Option<String>,
    /// Last failed export, cleared only by a successful export
    pub export_error: Option<String>,
    pub saving: bool,
    pub exporting: bool,
    pub loaded_at: Option<DateTime<Utc>>,
}

struct SessionState {
    trip: Trip,
    places: Vec<Place>,
    status: PlacesStatus,
    category: PlaceCategory,
    language: Language,
    selected: BTreeSet<String>,
    load_error: Option<String>,
    save_error: Option<String>,
    export_error: Option<String>,
    saves_in_flight: usize,
    loaded_at: Option<DateTime<Utc>>,
}

/// Resets the exporting flag when an export finishes, however it finishes
struct ExportGuard<'a>(&'a AtomicBool);

impl Drop for ExportGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Trip detail session
/// DOCUMENTATION: Owns the nearby-places list, the checked-place set and the
/// cached trip for one detail view. Every operation takes `&self`, so loads,
/// saves and exports may overlap; load responses are applied in issue order
pub struct PlaceSelectionSync {
    client: Arc<TripPlannerClient>,
    settings: SelectionSettings,
    trip_id: i64,
    state: RwLock<SessionState>,
    /// Token of the most recently issued load
    load_token: AtomicU64,
    exporting: AtomicBool,
    closed: watch::Sender<bool>,
}

impl PlaceSelectionSync {
    /// Start a session for an already loaded trip
    /// DOCUMENTATION: The selection starts as the trip's stored places
    pub fn new(client: Arc<TripPlannerClient>, trip: Trip, settings: SelectionSettings) -> Self {
        let selected = trip
            .places_to_visit
            .iter()
            .filter(|xid| !xid.is_empty())
            .cloned()
            .collect();
        let (closed, _) = watch::channel(false);

        Self {
            client,
            settings,
            trip_id: trip.id,
            state: RwLock::new(SessionState {
                trip,
                places: Vec::new(),
                status: PlacesStatus::NotLoaded,
                category: PlaceCategory::default(),
                language: Language::default(),
                selected,
                load_error: None,
                save_error: None,
                export_error: None,
                saves_in_flight: 0,
                loaded_at: None,
            }),
            load_token: AtomicU64::new(0),
            exporting: AtomicBool::new(false),
            closed,
        }
    }

    /// Fetch the trip and start a session for it
    pub async fn open(
        client: Arc<TripPlannerClient>,
        trip_id: i64,
        settings: SelectionSettings,
    ) -> Result<Self, TripPlannerError> {
        let trip = client.get_trip(trip_id).await?;
        log::debug!(
            "Opened trip {} ({}) with {} saved places",
            trip.id,
            trip.city,
            trip.places_to_visit.len()
        );
        Ok(Self::new(client, trip, settings))
    }

    pub fn trip_id(&self) -> i64 {
        self.trip_id
    }

    pub fn settings(&self) -> SelectionSettings {
        self.settings
    }

    /// Load nearby places for the trip's city
    /// DOCUMENTATION: Replaces the list in full on success. On failure the
    /// previous list stays and the error is recorded. Responses of loads that
    /// were superseded or whose session was closed are dropped untouched
    ///
    /// # Arguments
    /// * `category` - Category to query
    /// * `language` - Language of translated names
    pub async fn load_places(
        &self,
        category: PlaceCategory,
        language: Language,
    ) -> Result<LoadOutcome, TripPlannerError> {
        if self.is_closed() {
            return Ok(LoadOutcome::Abandoned);
        }

        let city = self.state.read().await.trip.city.clone();
        if city.trim().is_empty() {
            return Err(TripPlannerError::InvalidInput(
                "Trip has no city to search places for".to_string(),
            ));
        }

        let token = {
            let mut state = self.state.write().await;
            let token = self.load_token.fetch_add(1, Ordering::SeqCst) + 1;
            state.status = PlacesStatus::Loading;
            state.category = category;
            state.language = language;
            token
        };

        let request = self
            .client
            .search_places(&city, category, self.settings.places_limit, language);
        let result = tokio::select! {
            result = request => result,
            _ = self.wait_closed() => {
                log::debug!("Places load {} abandoned, session closed", token);
                return Ok(LoadOutcome::Abandoned);
            }
        };

        let mut state = self.state.write().await;
        if self.is_closed() {
            return Ok(LoadOutcome::Abandoned);
        }
        if self.load_token.load(Ordering::SeqCst) != token {
            log::debug!(
                "Discarding places load {} ({}), a newer load was issued",
                token,
                category
            );
            return Ok(LoadOutcome::Superseded);
        }

        match result {
            Ok(places) => {
                let count = places.len();
                state.places = places;
                state.status = PlacesStatus::Ready;
                state.load_error = None;
                state.loaded_at = Some(Utc::now());
                Ok(LoadOutcome::Applied { count })
            }
            Err(e) => {
                log::warn!("Places load for {} failed: {}", city, e);
                state.status = PlacesStatus::Failed;
                state.load_error = Some(e.user_message());
                Err(e)
            }
        }
    }

    /// Loaded places matching `query`, in list order
    pub async fn visible_places(&self, query: &str) -> Vec<Place> {
        let state = self.state.read().await;
        filter_places(&state.places, query)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Check or uncheck a place
    /// DOCUMENTATION: Local only, no request is made. Places without an
    /// identifier cannot be selected and the action is ignored
    pub async fn toggle_selection(&self, xid: &str, included: bool) -> SelectionChange {
        if xid.trim().is_empty() {
            log::debug!("Ignoring selection toggle for a place without xid");
            return SelectionChange::Ignored;
        }

        let mut state = self.state.write().await;
        if included {
            if state.selected.insert(xid.to_string()) {
                SelectionChange::Added
            } else {
                SelectionChange::Unchanged
            }
        } else if state.selected.remove(xid) {
            SelectionChange::Removed
        } else {
            SelectionChange::Unchanged
        }
    }

    /// Toggle and, with auto-save enabled, persist right away
    pub async fn toggle_and_sync(
        &self,
        xid: &str,
        included: bool,
    ) -> Result<SelectionChange, TripPlannerError> {
        let change = self.toggle_selection(xid, included).await;
        if self.settings.auto_save && change.changed() {
            self.persist_selection().await?;
        }
        Ok(change)
    }

    #[cfg(test)]
    pub async fn is_selected(&self, xid: &str) -> bool {
        self.state.read().await.selected.contains(xid)
    }

    pub async fn selection(&self) -> BTreeSet<String> {
        self.state.read().await.selected.clone()
    }

    /// Send the full selection to the trip service
    /// DOCUMENTATION: On success the cached trip's places become exactly the
    /// sent set. On failure the selection is left as the user left it so the
    /// save can be retried
    ///
    /// # Returns
    /// The identifiers that were saved, sorted
    pub async fn persist_selection(&self) -> Result<Vec<String>, TripPlannerError> {
        let places: Vec<String> = {
            let mut state = self.state.write().await;
            state.saves_in_flight += 1;
            state.selected.iter().cloned().collect()
        };

        let result = self.client.set_trip_places(self.trip_id, &places).await;

        let mut state = self.state.write().await;
        state.saves_in_flight = state.saves_in_flight.saturating_sub(1);
        match result {
            Ok(()) => {
                log::info!("Saved {} places for trip {}", places.len(), self.trip_id);
                state.trip.places_to_visit = places.clone();
                state.save_error = None;
                Ok(places)
            }
            Err(e) => {
                log::warn!("Saving places for trip {} failed: {}", self.trip_id, e);
                state.save_error = Some(e.user_message());
                Err(e)
            }
        }
    }

    /// Download the trip's PDF into `dir`
    /// DOCUMENTATION: Only one export runs at a time; a second request while one
    /// is in flight returns `AlreadyInProgress` without contacting the service
    pub async fn export_pdf(&self, dir: &Path) -> Result<ExportOutcome, TripPlannerError> {
        if self
            .exporting
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            log::warn!("Export of trip {} already in progress", self.trip_id);
            return Ok(ExportOutcome::AlreadyInProgress);
        }
        let _guard = ExportGuard(&self.exporting);

        let trip = self.state.read().await.trip.clone();
        let result = match self.client.export_trip_pdf(trip.id).await {
            Ok(bytes) => write_export(dir, &pdf_file_name(&trip), &bytes).await,
            Err(e) => Err(e),
        };

        let mut state = self.state.write().await;
        match result {
            Ok(path) => {
                state.export_error = None;
                Ok(ExportOutcome::Saved(path))
            }
            Err(e) => {
                log::warn!("PDF export of trip {} failed: {}", trip.id, e);
                state.export_error = Some(e.user_message());
                Err(e)
            }
        }
    }

    pub fn is_exporting(&self) -> bool {
        self.exporting.load(Ordering::SeqCst)
    }

    /// Dismount the session
    /// DOCUMENTATION: In-flight loads resolve as `Abandoned` and never touch state
    pub fn close(&self) {
        self.closed.send_replace(true);
    }

    pub fn is_closed(&self) -> bool {
        *self.closed.borrow()
    }

    async fn wait_closed(&self) {
        let mut rx = self.closed.subscribe();
        while !*rx.borrow_and_update() {
            if rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }

    pub async fn snapshot(&self) -> SelectionSnapshot {
        let state = self.state.read().await;
        SelectionSnapshot {
            trip: state.trip.clone(),
            places: state.places.clone(),
            status: state.status,
            category: state.category,
            language: state.language,
            selected: state.selected.clone(),
            load_error: state.load_error.clone(),
            save_error: state.save_error.clone(),
            export_error: state.export_error.clone(),
            saving: state.saves_in_flight > 0,
            exporting: self.is_exporting(),
            loaded_at: state.loaded_at,
        }
    }
}
