//! Species aggregation over a user's accepted observations
//!
//! Everything here is a pure function of the observation slice, recomputed
//! per request. No privacy rules are applied at this layer.
//!
//! - [`summary`] - Distinct species with first-sighting metadata, both sort orders
//! - [`progress`] - Cumulative monthly progress
//! - [`geography`] - Per-state breakdown

pub mod geography;
pub mod progress;
pub mod summary;

#[cfg(test)]
pub mod tests;

pub use geography::{StateStats, geographic_stats};
pub use progress::{MonthlyProgress, monthly_progress};
pub use summary::{SpeciesSort, SpeciesYearSummary, UserYearSummary, sort_species, summarize_year};
