// src/services/mod.rs
// DOCUMENTATION: Services module organization
// PURPOSE: Re-export service components

pub mod pdf_export;
pub mod place_filter;
pub mod selection_sync;
pub mod trip_client;

#[cfg(test)]
pub mod test_backend;

pub use pdf_export::*;
pub use place_filter::*;
pub use selection_sync::*;
pub use trip_client::*;
