//! Leaderboard ordering and competition ranking
//!
//! Standings are recomputed from the store on every query. Order is species
//! count descending, then earlier last sighting, then user id. Ranks use
//! standard competition ranking: tied counts share a rank and the next
//! distinct count skips by the size of the tie (1, 1, 3, 4).

use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::app::models::{PrivacyLevel, UserId};

/// One user's standing before ranking
#[derive(Debug, Clone, PartialEq)]
pub struct RankInput {
    pub user_id: UserId,
    pub name: String,
    pub privacy_level: PrivacyLevel,
    pub species_count: usize,
    pub last_observation_date: Option<NaiveDate>,
}

/// A ranked leaderboard entry
#[derive(Debug, Clone, PartialEq)]
pub struct RankedEntry {
    /// 1-based competition rank
    pub rank: usize,
    pub user_id: UserId,
    pub name: String,
    pub privacy_level: PrivacyLevel,
    pub species_count: usize,
    pub last_observation_date: Option<NaiveDate>,
}

/// Ranked standings for one year
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Standings {
    /// Non-private users, with or without sightings
    pub participants: usize,
    pub entries: Vec<RankedEntry>,
}

impl Standings {
    /// Keep only the first `limit` entries; ranks and participants are unchanged
    pub fn truncate(mut self, limit: usize) -> Self {
        self.entries.truncate(limit);
        self
    }
}

fn compare_inputs(a: &RankInput, b: &RankInput) -> Ordering {
    b.species_count
        .cmp(&a.species_count)
        .then_with(|| match (a.last_observation_date, b.last_observation_date) {
            (Some(a_date), Some(b_date)) => a_date.cmp(&b_date),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
        .then_with(|| a.user_id.cmp(&b.user_id))
}

/// Competition ranks for counts already sorted in descending order
pub fn competition_ranks(sorted_counts: &[usize]) -> Vec<usize> {
    let mut ranks = Vec::with_capacity(sorted_counts.len());
    for (position, count) in sorted_counts.iter().enumerate() {
        let rank = match position {
            0 => 1,
            _ if sorted_counts[position - 1] == *count => ranks[position - 1],
            _ => position + 1,
        };
        ranks.push(rank);
    }
    ranks
}

/// Order and rank users; private users are dropped entirely
pub fn rank_entries(inputs: Vec<RankInput>) -> Standings {
    let mut listed: Vec<RankInput> = inputs
        .into_iter()
        .filter(|input| input.privacy_level.is_listed())
        .collect();
    listed.sort_by(compare_inputs);

    let counts: Vec<usize> = listed.iter().map(|input| input.species_count).collect();
    let ranks = competition_ranks(&counts);

    let entries = listed
        .into_iter()
        .zip(ranks)
        .map(|(input, rank)| RankedEntry {
            rank,
            user_id: input.user_id,
            name: input.name,
            privacy_level: input.privacy_level,
            species_count: input.species_count,
            last_observation_date: input.last_observation_date,
        })
        .collect::<Vec<_>>();

    Standings {
        participants: entries.len(),
        entries,
    }
}
