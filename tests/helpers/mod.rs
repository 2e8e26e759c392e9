//! Shared test helpers
//!
//! - `analysis_helpers` builds analyses and pulls typedef lines out of them
//! - `source_fixtures` holds the larger sample stores

pub mod analysis_helpers;
pub mod source_fixtures;
