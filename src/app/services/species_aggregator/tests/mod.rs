//! Test utilities for species aggregation

use chrono::{NaiveDate, TimeZone, Utc};

use crate::app::models::Observation;

mod summary_tests;

/// Builder for stored observations
pub struct ObservationBuilder {
    observation: Observation,
}

impl ObservationBuilder {
    pub fn new(sequence: u64, common_name: &str, scientific_name: &str, date: &str) -> Self {
        Self {
            observation: Observation {
                sequence,
                user_id: 1,
                submission_id: Some(format!("S{}", sequence)),
                common_name: common_name.to_string(),
                scientific_name: scientific_name.to_string(),
                taxonomic_order: None,
                count: Some("1".to_string()),
                state_province: Some("US-OH".to_string()),
                county: Some("Hamilton".to_string()),
                location: None,
                latitude: None,
                longitude: None,
                observation_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
                row_ordinal: sequence as usize + 1,
                uploaded_at: Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap(),
            },
        }
    }

    pub fn user(mut self, user_id: u64) -> Self {
        self.observation.user_id = user_id;
        self
    }

    pub fn state(mut self, state: Option<&str>) -> Self {
        self.observation.state_province = state.map(str::to_string);
        self
    }

    pub fn county(mut self, county: Option<&str>) -> Self {
        self.observation.county = county.map(str::to_string);
        self
    }

    pub fn build(self) -> Observation {
        self.observation
    }
}

pub fn obs(sequence: u64, common_name: &str, scientific_name: &str, date: &str) -> Observation {
    ObservationBuilder::new(sequence, common_name, scientific_name, date).build()
}
