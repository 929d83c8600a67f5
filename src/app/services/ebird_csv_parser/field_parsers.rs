//! Field parsing utilities for eBird export rows
//!
//! Required fields come back as `Option` so the row parser can turn a gap
//! into a rejection reason; optional numeric fields are lenient and simply
//! become `None` when they do not parse.

use super::column_mapping::RowSource;
use crate::constants::DATE_FORMATS;
use chrono::NaiveDate;

/// Get a trimmed, non-empty field value
pub fn get_field<'a, R>(row: &'a R, column: &str) -> Option<&'a str>
where
    R: RowSource + ?Sized,
{
    row.field(column)
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Parse an optional string field
pub fn parse_optional_string<R>(row: &R, column: &str) -> Option<String>
where
    R: RowSource + ?Sized,
{
    get_field(row, column).map(str::to_string)
}

/// Parse an optional integer field, ignoring values that do not parse
pub fn parse_optional_i64<R>(row: &R, column: &str) -> Option<i64>
where
    R: RowSource + ?Sized,
{
    get_field(row, column).and_then(|s| s.parse::<i64>().ok())
}

/// Parse an optional float field, ignoring values that do not parse
pub fn parse_optional_f64<R>(row: &R, column: &str) -> Option<f64>
where
    R: RowSource + ?Sized,
{
    get_field(row, column)
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Parse an observation date in any of the accepted export formats
pub fn parse_observation_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_parse_observation_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        assert_eq!(parse_observation_date("2026-03-01"), Some(expected));
        assert_eq!(parse_observation_date(" 03/01/2026 "), Some(expected));
        assert_eq!(parse_observation_date("2026/03/01"), Some(expected));
        assert_eq!(parse_observation_date("2026-02-30"), None);
        assert_eq!(parse_observation_date("yesterday"), None);
        assert_eq!(parse_observation_date(""), None);
    }

    #[test]
    fn test_optional_numeric_fields_are_lenient() {
        let row: HashMap<&str, &str> = [
            ("Taxonomic Order", "  1234 "),
            ("Latitude", "not-a-number"),
            ("Longitude", "-84.51"),
            ("Count", "X"),
        ]
        .into_iter()
        .collect();

        assert_eq!(parse_optional_i64(&row, "Taxonomic Order"), Some(1234));
        assert_eq!(parse_optional_f64(&row, "Latitude"), None);
        assert_eq!(parse_optional_f64(&row, "Longitude"), Some(-84.51));
        assert_eq!(parse_optional_string(&row, "Count"), Some("X".to_string()));
        assert_eq!(parse_optional_string(&row, "County"), None);
    }

    #[test]
    fn test_blank_field_is_absent() {
        let row: HashMap<&str, &str> = [("State/Province", "   ")].into_iter().collect();
        assert_eq!(get_field(&row, "State/Province"), None);
    }
}
