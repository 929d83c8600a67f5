//! Test utilities for eBird CSV parser testing
//!
//! This module provides export fixtures shared by the parser tests and by the
//! downstream services that need realistic CSV input.

use std::collections::HashMap;
use std::io::Write;
use tempfile::NamedTempFile;

mod record_parser_tests;
mod taxonomy_tests;

/// Header of the standard "MyEBirdData.csv" personal export
pub const EBIRD_HEADER: &str = "Submission ID,Common Name,Scientific Name,Taxonomic Order,Count,\
State/Province,County,Location ID,Location,Latitude,Longitude,Date,Time,Protocol,\
Duration (Min),All Obs Reported,Distance Traveled (km),Area Covered (ha),\
Number of Observers,Breeding Code,Observation Details,Checklist Comments,ML Catalog Numbers";

/// One sighting for building export rows
#[derive(Debug, Clone)]
pub struct Sighting {
    pub submission_id: String,
    pub common_name: String,
    pub scientific_name: String,
    pub state_province: String,
    pub date: String,
}

impl Sighting {
    pub fn new(submission_id: &str, common_name: &str, scientific_name: &str, date: &str) -> Self {
        Self {
            submission_id: submission_id.to_string(),
            common_name: common_name.to_string(),
            scientific_name: scientific_name.to_string(),
            state_province: "US-OH".to_string(),
            date: date.to_string(),
        }
    }

    pub fn in_state(mut self, state_province: &str) -> Self {
        self.state_province = state_province.to_string();
        self
    }

    /// Render as a 23-column export row
    pub fn to_row(&self) -> String {
        let fields = [
            self.submission_id.as_str(),
            self.common_name.as_str(),
            self.scientific_name.as_str(),
            "1234",
            "2",
            self.state_province.as_str(),
            "Hamilton",
            "L123456",
            "Spring Grove Cemetery, Cincinnati",
            "39.1653",
            "-84.5225",
            self.date.as_str(),
            "07:15 AM",
            "eBird - Traveling Count",
            "60",
            "1",
            "2.1",
            "",
            "1",
            "",
            "",
            "",
            "",
        ];
        fields
            .iter()
            .map(|field| quote_field(field))
            .collect::<Vec<_>>()
            .join(",")
    }
}

fn quote_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Build a complete export with the standard header
pub fn ebird_csv(sightings: &[Sighting]) -> String {
    let mut content = String::from(EBIRD_HEADER);
    content.push('\n');
    for sighting in sightings {
        content.push_str(&sighting.to_row());
        content.push('\n');
    }
    content
}

/// The three-row export used for end-to-end checks
pub fn cardinal_and_goose_csv() -> String {
    ebird_csv(&[
        Sighting::new("S100", "Northern Cardinal", "Cardinalis cardinalis", "2026-03-01"),
        Sighting::new("S100", "Northern Cardinal", "Cardinalis cardinalis", "2026-03-01"),
        Sighting::new(
            "S101",
            "Domestic Goose",
            "Anser anser (Domestic type)",
            "2026-03-02",
        ),
    ])
}

/// Column-name map for a single row
pub fn row_map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Helper to create temporary export file for testing
pub fn create_temp_file(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(content.as_bytes()).unwrap();
    temp_file.flush().unwrap();
    temp_file
}
