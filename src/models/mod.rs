// src/models/mod.rs
// DOCUMENTATION: Models module organization
// PURPOSE: Re-export model components

pub mod language;
pub mod place;
pub mod trip;

pub use language::*;
pub use place::*;
pub use trip::*;
