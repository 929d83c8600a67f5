//! Test utilities for observation store testing

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::app::models::{CandidateObservation, UserId};


pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap()
}

/// Candidate with checklist id and Ohio as the state
pub fn candidate(
    user_id: UserId,
    scientific_name: &str,
    observation_date: NaiveDate,
    submission_id: Option<&str>,
) -> CandidateObservation {
    CandidateObservation {
        user_id,
        submission_id: submission_id.map(str::to_string),
        common_name: format!("Common {}", scientific_name),
        scientific_name: scientific_name.to_string(),
        taxonomic_order: Some(100),
        count: Some("1".to_string()),
        state_province: Some("US-OH".to_string()),
        county: Some("Hamilton".to_string()),
        location: Some("Spring Grove".to_string()),
        latitude: Some(39.16),
        longitude: Some(-84.52),
        observation_date,
        row_ordinal: 1,
    }
}
