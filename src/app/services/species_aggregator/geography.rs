//! Per-state breakdown of a user's year

use std::collections::{BTreeMap, BTreeSet, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::app::models::Observation;

/// Species and coverage within one state/province
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateStats {
    pub state_province: String,
    pub species_count: usize,
    pub observation_count: usize,
    /// Distinct counties, sorted
    pub counties: Vec<String>,
    pub first_observation_date: NaiveDate,
    pub last_observation_date: NaiveDate,
}

#[derive(Default)]
struct StateAccumulator<'a> {
    species: HashSet<&'a str>,
    counties: BTreeSet<&'a str>,
    observations: usize,
    first: Option<NaiveDate>,
    last: Option<NaiveDate>,
}

/// Per-state stats for one year, most species first
///
/// Sightings without a state/province are left out.
pub fn geographic_stats(year: i32, observations: &[Observation]) -> Vec<StateStats> {
    let mut states: BTreeMap<&str, StateAccumulator<'_>> = BTreeMap::new();

    for observation in observations.iter().filter(|o| o.in_year(year)) {
        let Some(state) = observation.state_province.as_deref() else {
            continue;
        };
        let date = observation.observation_date;
        let entry = states.entry(state).or_default();
        entry.species.insert(observation.scientific_name.as_str());
        if let Some(county) = observation.county.as_deref() {
            entry.counties.insert(county);
        }
        entry.observations += 1;
        entry.first = Some(entry.first.map_or(date, |d| d.min(date)));
        entry.last = Some(entry.last.map_or(date, |d| d.max(date)));
    }

    let mut stats: Vec<StateStats> = states
        .into_iter()
        .filter_map(|(state, acc)| {
            Some(StateStats {
                state_province: state.to_string(),
                species_count: acc.species.len(),
                observation_count: acc.observations,
                counties: acc.counties.into_iter().map(str::to_string).collect(),
                first_observation_date: acc.first?,
                last_observation_date: acc.last?,
            })
        })
        .collect();

    // BTreeMap order keeps ties alphabetical
    stats.sort_by(|a, b| b.species_count.cmp(&a.species_count));
    stats
}
