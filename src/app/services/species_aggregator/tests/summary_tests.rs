//! Tests for year summaries and species ordering

use super::*;
use crate::app::services::species_aggregator::{SpeciesSort, sort_species, summarize_year};

fn names(summary: &[crate::app::services::species_aggregator::SpeciesYearSummary]) -> Vec<&str> {
    summary.iter().map(|s| s.common_name.as_str()).collect()
}

#[test]
fn test_species_count_is_distinct_scientific_names_in_year() {
    let observations = vec![
        obs(0, "Northern Cardinal", "Cardinalis cardinalis", "2026-03-01"),
        obs(1, "Northern Cardinal", "Cardinalis cardinalis", "2026-04-01"),
        obs(2, "American Robin", "Turdus migratorius", "2026-02-10"),
        obs(3, "Blue Jay", "Cyanocitta cristata", "2025-12-31"),
        obs(4, "Blue Jay", "Cyanocitta cristata", "2027-01-01"),
    ];

    let summary = summarize_year(1, 2026, &observations);
    assert_eq!(summary.species_count(), 2);
    assert_eq!(summary.species.len(), summary.species_count());
    assert_eq!(summary.observation_count, 3);
    assert_eq!(
        summary.last_observation_date.map(|d| d.to_string()),
        Some("2026-04-01".to_string())
    );

    let other_year = summarize_year(1, 2027, &observations);
    assert_eq!(other_year.species_count(), 1);
}

#[test]
fn test_first_observation_tracks_earliest_date_and_its_state() {
    let observations = vec![
        ObservationBuilder::new(0, "Northern Cardinal", "Cardinalis cardinalis", "2026-05-01")
            .state(Some("US-KY"))
            .build(),
        ObservationBuilder::new(1, "Northern Cardinal", "Cardinalis cardinalis", "2026-03-01")
            .state(Some("US-IN"))
            .build(),
        ObservationBuilder::new(2, "Northern Cardinal", "Cardinalis cardinalis", "2026-03-01")
            .state(Some("US-OH"))
            .build(),
    ];

    let summary = summarize_year(1, 2026, &observations);
    let cardinal = &summary.species[0];
    assert_eq!(cardinal.first_observation_date.to_string(), "2026-03-01");
    // Same-day tie goes to the earlier import
    assert_eq!(cardinal.state_province.as_deref(), Some("US-IN"));
    assert_eq!(cardinal.observation_count, 3);
}

#[test]
fn test_empty_year() {
    let summary = summarize_year(9, 2026, &[]);
    assert_eq!(summary.species_count(), 0);
    assert!(summary.last_observation_date.is_none());
    assert_eq!(summary.user_id, 9);
    assert_eq!(summary.year, 2026);
}

#[test]
fn test_name_sort_is_case_insensitive_with_scientific_tiebreak() {
    let observations = vec![
        obs(0, "blue Jay", "Cyanocitta cristata", "2026-01-05"),
        obs(1, "American Robin", "Turdus migratorius", "2026-01-06"),
        obs(2, "Bald Eagle", "Haliaeetus leucocephalus", "2026-01-07"),
        obs(3, "Dark-eyed Junco", "Junco hyemalis", "2026-01-08"),
        obs(4, "Dark-eyed Junco", "Junco aikeni", "2026-01-09"),
    ];

    let summary = summarize_year(1, 2026, &observations);
    assert_eq!(
        names(&summary.species),
        vec![
            "American Robin",
            "Bald Eagle",
            "blue Jay",
            "Dark-eyed Junco",
            "Dark-eyed Junco"
        ]
    );
    assert_eq!(summary.species[3].scientific_name, "Junco aikeni");
}

#[test]
fn test_date_sort_is_most_recent_first_with_name_tiebreak() {
    let observations = vec![
        obs(0, "Blue Jay", "Cyanocitta cristata", "2026-01-05"),
        obs(1, "American Robin", "Turdus migratorius", "2026-03-01"),
        obs(2, "Carolina Wren", "Thryothorus ludovicianus", "2026-03-01"),
        obs(3, "Bald Eagle", "Haliaeetus leucocephalus", "2026-02-01"),
    ];

    let mut species = summarize_year(1, 2026, &observations).species;
    sort_species(&mut species, SpeciesSort::Date);
    assert_eq!(
        names(&species),
        vec!["American Robin", "Carolina Wren", "Bald Eagle", "Blue Jay"]
    );
}

#[test]
fn test_sort_key_parsing() {
    assert_eq!("name".parse::<SpeciesSort>().unwrap(), SpeciesSort::Name);
    assert_eq!("date".parse::<SpeciesSort>().unwrap(), SpeciesSort::Date);
    assert!("rank".parse::<SpeciesSort>().is_err());
    assert_eq!(SpeciesSort::default(), SpeciesSort::Name);
}
