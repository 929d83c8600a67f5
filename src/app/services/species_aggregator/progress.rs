//! Month-by-month Big Year progress

use std::collections::HashMap;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::app::models::Observation;

/// Progress within one calendar month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyProgress {
    /// 1 = January
    pub month: u32,
    /// "YYYY-MM"
    pub period: String,
    /// Distinct species seen from January through this month
    pub cumulative_species: usize,
    /// Species first seen this month
    pub new_species: usize,
    /// Sightings dated this month
    pub observations: usize,
}

/// Cumulative progress from January to the last month with data
pub fn monthly_progress(year: i32, observations: &[Observation]) -> Vec<MonthlyProgress> {
    let mut first_month: HashMap<&str, u32> = HashMap::new();
    let mut per_month = [0usize; 12];

    for observation in observations.iter().filter(|o| o.in_year(year)) {
        let month = observation.observation_date.month();
        per_month[(month - 1) as usize] += 1;
        first_month
            .entry(observation.scientific_name.as_str())
            .and_modify(|m| *m = (*m).min(month))
            .or_insert(month);
    }

    let Some(last_month) = per_month.iter().rposition(|count| *count > 0) else {
        return Vec::new();
    };

    let mut new_per_month = [0usize; 12];
    for month in first_month.values() {
        new_per_month[(month - 1) as usize] += 1;
    }

    let mut cumulative = 0;
    (0..=last_month)
        .map(|index| {
            cumulative += new_per_month[index];
            MonthlyProgress {
                month: index as u32 + 1,
                period: format!("{}-{:02}", year, index + 1),
                cumulative_species: cumulative,
                new_species: new_per_month[index],
                observations: per_month[index],
            }
        })
        .collect()
}
