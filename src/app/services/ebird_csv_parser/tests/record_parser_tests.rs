//! Tests for single-row classification

use super::*;
use crate::app::services::ebird_csv_parser::{RejectReason, RowOutcome, parse_row};
use chrono::NaiveDate;

fn cardinal_row(date: &str) -> HashMap<String, String> {
    row_map(&[
        ("Submission ID", "S100"),
        ("Common Name", "Northern Cardinal"),
        ("Scientific Name", "Cardinalis cardinalis"),
        ("Taxonomic Order", "31012"),
        ("Count", "X"),
        ("State/Province", "US-OH"),
        ("County", "Hamilton"),
        ("Location", "Spring Grove"),
        ("Latitude", "39.1653"),
        ("Longitude", "-84.5225"),
        ("Date", date),
    ])
}

fn rejection_reason(outcome: RowOutcome) -> RejectReason {
    match outcome {
        RowOutcome::Rejected(rejection) => rejection.reason,
        RowOutcome::Candidate(candidate) => {
            panic!("expected rejection, got candidate {:?}", candidate)
        }
    }
}

#[test]
fn test_valid_row_becomes_candidate() {
    let outcome = parse_row(&cardinal_row("2026-03-01"), 7, 2026, 1);

    let RowOutcome::Candidate(candidate) = outcome else {
        panic!("expected candidate");
    };
    assert_eq!(candidate.user_id, 7);
    assert_eq!(candidate.submission_id.as_deref(), Some("S100"));
    assert_eq!(candidate.scientific_name, "Cardinalis cardinalis");
    assert_eq!(
        candidate.observation_date,
        NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
    );
    assert_eq!(candidate.state_province.as_deref(), Some("US-OH"));
    assert_eq!(candidate.taxonomic_order, Some(31012));
    assert_eq!(candidate.count.as_deref(), Some("X"));
    assert_eq!(candidate.latitude, Some(39.1653));
    assert_eq!(candidate.row_ordinal, 1);
}

#[test]
fn test_unparsable_and_empty_dates_are_invalid() {
    assert_eq!(
        rejection_reason(parse_row(&cardinal_row("March 1st"), 1, 2026, 1)),
        RejectReason::InvalidDate
    );
    assert_eq!(
        rejection_reason(parse_row(&cardinal_row(""), 1, 2026, 1)),
        RejectReason::InvalidDate
    );
}

#[test]
fn test_date_outside_competition_year_is_out_of_range() {
    assert_eq!(
        rejection_reason(parse_row(&cardinal_row("2025-12-31"), 1, 2026, 1)),
        RejectReason::OutOfRange
    );
    assert_eq!(
        rejection_reason(parse_row(&cardinal_row("2027-01-01"), 1, 2026, 1)),
        RejectReason::OutOfRange
    );
    assert!(parse_row(&cardinal_row("2026-12-31"), 1, 2026, 1).is_candidate());
    assert!(parse_row(&cardinal_row("2026-01-01"), 1, 2026, 1).is_candidate());
}

#[test]
fn test_missing_names_are_missing_field() {
    let mut row = cardinal_row("2026-03-01");
    row.insert("Scientific Name".to_string(), "  ".to_string());
    assert_eq!(
        rejection_reason(parse_row(&row, 1, 2026, 1)),
        RejectReason::MissingField
    );

    let mut row = cardinal_row("2026-03-01");
    row.remove("Common Name");
    assert_eq!(
        rejection_reason(parse_row(&row, 1, 2026, 1)),
        RejectReason::MissingField
    );
}

#[test]
fn test_invalid_date_takes_precedence_over_missing_names() {
    let row = row_map(&[("Date", "not a date")]);
    assert_eq!(
        rejection_reason(parse_row(&row, 1, 2026, 1)),
        RejectReason::InvalidDate
    );
}

#[test]
fn test_out_of_range_takes_precedence_over_countability() {
    let row = row_map(&[
        ("Common Name", "Mallard x American Black Duck (hybrid)"),
        ("Scientific Name", "Anas platyrhynchos x rubripes"),
        ("Date", "2025-06-01"),
    ]);
    assert_eq!(
        rejection_reason(parse_row(&row, 1, 2026, 1)),
        RejectReason::OutOfRange
    );
}

#[test]
fn test_non_species_forms_are_not_countable() {
    for (common, scientific) in [
        ("Domestic Goose", "Anser anser (Domestic type)"),
        ("Mallard (Domestic type)", "Anas platyrhynchos (Domestic type)"),
        (
            "Mallard x American Black Duck (hybrid)",
            "Anas platyrhynchos x rubripes",
        ),
        ("Greater/Lesser Scaup", "Aythya marila/affinis"),
        ("duck sp.", "Anatinae sp."),
    ] {
        let row = row_map(&[
            ("Common Name", common),
            ("Scientific Name", scientific),
            ("Date", "2026-05-01"),
        ]);
        assert_eq!(
            rejection_reason(parse_row(&row, 1, 2026, 1)),
            RejectReason::NotCountable,
            "{} should not count",
            common
        );
    }
}

#[test]
fn test_category_column_overrides_name_inference() {
    let mut row = cardinal_row("2026-03-01");
    row.insert("Category".to_string(), "hybrid".to_string());
    assert_eq!(
        rejection_reason(parse_row(&row, 1, 2026, 1)),
        RejectReason::NotCountable
    );

    let row = row_map(&[
        ("Common Name", "Yellow-rumped Warbler (Myrtle)"),
        ("Scientific Name", "Setophaga coronata coronata"),
        ("Taxonomic Category", "issf"),
        ("Date", "2026-04-20"),
    ]);
    assert!(parse_row(&row, 1, 2026, 1).is_candidate());
}

#[test]
fn test_missing_submission_id_still_parses() {
    let mut row = cardinal_row("2026-03-01");
    row.remove("Submission ID");

    let RowOutcome::Candidate(candidate) = parse_row(&row, 1, 2026, 4) else {
        panic!("expected candidate");
    };
    assert!(candidate.submission_id.is_none());
    assert_eq!(candidate.row_ordinal, 4);
}

#[test]
fn test_bad_optional_numbers_do_not_reject() {
    let mut row = cardinal_row("2026-03-01");
    row.insert("Latitude".to_string(), "north".to_string());
    row.insert("Taxonomic Order".to_string(), "".to_string());

    let RowOutcome::Candidate(candidate) = parse_row(&row, 1, 2026, 1) else {
        panic!("expected candidate");
    };
    assert!(candidate.latitude.is_none());
    assert!(candidate.taxonomic_order.is_none());
    assert_eq!(candidate.longitude, Some(-84.5225));
}
