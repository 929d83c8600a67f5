//! Per-user, per-year species summaries
//!
//! Summaries are derived from the observation set on every call, so they can
//! never disagree with the stored rows. The species count used for ranking is
//! the length of the same species list the user sees.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::app::models::{Observation, UserId};
use crate::{Error, Result};

/// First-sighting record of one species within a year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesYearSummary {
    pub scientific_name: String,
    /// Common name as written on the first-sighting row
    pub common_name: String,
    pub first_observation_date: NaiveDate,
    /// State/province of the first-sighting row
    pub state_province: Option<String>,
    /// Sightings of this species within the year
    pub observation_count: usize,
    #[serde(skip)]
    first_sequence: u64,
}

/// Species summary for one user and year
#[derive(Debug, Clone, PartialEq)]
pub struct UserYearSummary {
    pub user_id: UserId,
    pub year: i32,
    /// Species ordered by name
    pub species: Vec<SpeciesYearSummary>,
    pub last_observation_date: Option<NaiveDate>,
    pub observation_count: usize,
}

impl UserYearSummary {
    pub fn species_count(&self) -> usize {
        self.species.len()
    }
}

/// Build the year summary for one user's observations
///
/// Observations outside `year` are ignored. The first sighting of a species
/// is the earliest date; same-day sightings fall back to import order.
pub fn summarize_year(user_id: UserId, year: i32, observations: &[Observation]) -> UserYearSummary {
    let mut by_species: HashMap<&str, SpeciesYearSummary> = HashMap::new();
    let mut last_observation_date: Option<NaiveDate> = None;
    let mut observation_count = 0;

    for observation in observations.iter().filter(|o| o.in_year(year)) {
        observation_count += 1;
        let date = observation.observation_date;
        last_observation_date = Some(last_observation_date.map_or(date, |d| d.max(date)));

        by_species
            .entry(observation.scientific_name.as_str())
            .and_modify(|summary| {
                summary.observation_count += 1;
                if (date, observation.sequence)
                    < (summary.first_observation_date, summary.first_sequence)
                {
                    summary.common_name = observation.common_name.clone();
                    summary.first_observation_date = date;
                    summary.state_province = observation.state_province.clone();
                    summary.first_sequence = observation.sequence;
                }
            })
            .or_insert_with(|| SpeciesYearSummary {
                scientific_name: observation.scientific_name.clone(),
                common_name: observation.common_name.clone(),
                first_observation_date: date,
                state_province: observation.state_province.clone(),
                observation_count: 1,
                first_sequence: observation.sequence,
            });
    }

    let mut species: Vec<SpeciesYearSummary> = by_species.into_values().collect();
    sort_species(&mut species, SpeciesSort::Name);

    UserYearSummary {
        user_id,
        year,
        species,
        last_observation_date,
        observation_count,
    }
}

/// Presentation order for species lists
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeciesSort {
    /// Common name, case-insensitive, then scientific name
    #[default]
    Name,
    /// Most recent first sighting first, then common name
    Date,
}

impl FromStr for SpeciesSort {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "name" => Ok(SpeciesSort::Name),
            "date" => Ok(SpeciesSort::Date),
            other => Err(Error::validation(format!(
                "Invalid sort '{}': expected name or date",
                other
            ))),
        }
    }
}

/// Sort a species list in place
pub fn sort_species(species: &mut [SpeciesYearSummary], sort: SpeciesSort) {
    match sort {
        SpeciesSort::Name => species.sort_by(|a, b| {
            a.common_name
                .to_lowercase()
                .cmp(&b.common_name.to_lowercase())
                .then_with(|| a.scientific_name.cmp(&b.scientific_name))
        }),
        SpeciesSort::Date => species.sort_by(|a, b| {
            b.first_observation_date
                .cmp(&a.first_observation_date)
                .then_with(|| {
                    a.common_name
                        .to_lowercase()
                        .cmp(&b.common_name.to_lowercase())
                })
                .then_with(|| a.scientific_name.cmp(&b.scientific_name))
        }),
    }
}
