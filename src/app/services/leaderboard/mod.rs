//! Leaderboard ranking and privacy-aware response views
//!
//! - [`ranking`] - Sort order, competition ranks, participant totals
//! - [`privacy`] - Redaction of leaderboard rows, species lists and progress

pub mod privacy;
pub mod ranking;

#[cfg(test)]
pub mod tests;

pub use privacy::{
    LeaderboardRow, LeaderboardView, ProgressView, SpeciesEntryView, SpeciesListView,
    leaderboard_row, leaderboard_view, progress_view, species_list_view,
};
pub use ranking::{RankInput, RankedEntry, Standings, competition_ranks, rank_entries};

use crate::app::services::observation_store::StoreView;
use crate::app::services::species_aggregator::summarize_year;

/// Rank every user in the store for `year`
///
/// Species counts come from the same summary the species list uses.
pub fn compute_standings(view: StoreView<'_>, year: i32) -> Standings {
    let inputs = view
        .users()
        .filter(|user| user.privacy_level.is_listed())
        .map(|user| {
            let summary = summarize_year(user.id, year, view.observations_for(user.id));
            RankInput {
                user_id: user.id,
                name: user.name.clone(),
                privacy_level: user.privacy_level,
                species_count: summary.species_count(),
                last_observation_date: summary.last_observation_date,
            }
        })
        .collect();
    rank_entries(inputs)
}
