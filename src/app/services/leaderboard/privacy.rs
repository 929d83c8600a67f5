//! Privacy filter for leaderboard and species-list responses
//!
//! This is the only place stored data is turned into something another
//! participant can see. Stored observations and summaries are never redacted;
//! redaction happens here, per response.
//!
//! | level         | leaderboard row | species list                    |
//! |---------------|-----------------|---------------------------------|
//! | `public`      | shown           | full, with state/province       |
//! | `counts_only` | shown           | names and dates, no state       |
//! | `private`     | omitted         | empty, with a message           |

use chrono::NaiveDate;
use serde::Serialize;

use super::ranking::{RankedEntry, Standings};
use crate::app::models::{PrivacyLevel, User, UserId};
use crate::app::services::species_aggregator::{
    MonthlyProgress, SpeciesSort, SpeciesYearSummary, UserYearSummary, sort_species,
};
use crate::constants::messages;

/// Leaderboard row as returned to clients
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardRow {
    pub user_id: UserId,
    pub rank: usize,
    pub name: String,
    pub species_count: usize,
    pub last_observation_date: Option<NaiveDate>,
    pub privacy_level: PrivacyLevel,
}

/// Leaderboard response body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardView {
    pub year: i32,
    pub participants: usize,
    pub leaderboard: Vec<LeaderboardRow>,
}

/// One species in a species-list response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeciesEntryView {
    pub scientific_name: String,
    pub common_name: String,
    pub first_observation_date: NaiveDate,
    pub state_province: Option<String>,
}

/// Species-list response body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeciesListView {
    pub user_id: UserId,
    pub user_name: String,
    pub year: i32,
    pub privacy_level: PrivacyLevel,
    pub species_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub species: Vec<SpeciesEntryView>,
}

/// Monthly progress response body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressView {
    pub user_id: UserId,
    pub user_name: String,
    pub year: i32,
    pub privacy_level: PrivacyLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub monthly_progress: Vec<MonthlyProgress>,
}

/// Visible leaderboard row, or `None` for a private user
pub fn leaderboard_row(entry: &RankedEntry) -> Option<LeaderboardRow> {
    if !entry.privacy_level.is_listed() {
        return None;
    }
    // counts_only keeps the last sighting date visible on the board
    Some(LeaderboardRow {
        user_id: entry.user_id,
        rank: entry.rank,
        name: entry.name.clone(),
        species_count: entry.species_count,
        last_observation_date: entry.last_observation_date,
        privacy_level: entry.privacy_level,
    })
}

/// Build the leaderboard response from ranked standings
pub fn leaderboard_view(year: i32, standings: &Standings) -> LeaderboardView {
    LeaderboardView {
        year,
        participants: standings.participants,
        leaderboard: standings.entries.iter().filter_map(leaderboard_row).collect(),
    }
}

fn species_entry(summary: SpeciesYearSummary, privacy_level: PrivacyLevel) -> SpeciesEntryView {
    let state_province = match privacy_level {
        PrivacyLevel::Public => summary.state_province,
        PrivacyLevel::CountsOnly | PrivacyLevel::Private => None,
    };
    SpeciesEntryView {
        scientific_name: summary.scientific_name,
        common_name: summary.common_name,
        first_observation_date: summary.first_observation_date,
        state_province,
    }
}

/// Build a species-list response for `owner`
///
/// A private owner yields an empty list and a count of zero, so the response
/// looks the same as a user with no data.
pub fn species_list_view(
    owner: &User,
    summary: UserYearSummary,
    sort: SpeciesSort,
) -> SpeciesListView {
    let privacy_level = owner.privacy_level;
    let (message, mut species) = match privacy_level {
        PrivacyLevel::Private => (Some(messages::PRIVATE.to_string()), Vec::new()),
        PrivacyLevel::CountsOnly => (Some(messages::COUNTS_ONLY.to_string()), summary.species),
        PrivacyLevel::Public => (None, summary.species),
    };

    sort_species(&mut species, sort);
    let species: Vec<SpeciesEntryView> = species
        .into_iter()
        .map(|entry| species_entry(entry, privacy_level))
        .collect();

    SpeciesListView {
        user_id: owner.id,
        user_name: owner.name.clone(),
        year: summary.year,
        privacy_level,
        species_count: species.len(),
        message,
        species,
    }
}

/// Build a progress response for `owner`
pub fn progress_view(owner: &User, year: i32, months: Vec<MonthlyProgress>) -> ProgressView {
    let (message, monthly_progress) = match owner.privacy_level {
        PrivacyLevel::Private => (Some(messages::PRIVATE.to_string()), Vec::new()),
        PrivacyLevel::CountsOnly | PrivacyLevel::Public => (None, months),
    };
    ProgressView {
        user_id: owner.id,
        user_name: owner.name.clone(),
        year,
        privacy_level: owner.privacy_level,
        message,
        monthly_progress,
    }
}
