//! Individual row parsing for eBird exports
//!
//! A row either becomes a [`CandidateObservation`] or is rejected with a
//! [`RejectReason`]. Checks run in a fixed order so every row gets exactly one
//! reason: date, required names, competition year, then countability.

use chrono::Datelike;
use tracing::debug;

use super::column_mapping::RowSource;
use super::field_parsers::{
    get_field, parse_observation_date, parse_optional_f64, parse_optional_i64,
    parse_optional_string,
};
use super::stats::{RejectReason, RowRejection};
use super::taxonomy::is_countable;
use crate::app::models::{CandidateObservation, UserId};
use crate::constants::columns;

/// Outcome of parsing one export row
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Candidate(CandidateObservation),
    Rejected(RowRejection),
}

impl RowOutcome {
    pub fn is_candidate(&self) -> bool {
        matches!(self, RowOutcome::Candidate(_))
    }
}

/// Parse a single export row for the given user and competition year
///
/// `row_ordinal` is the 1-based data row number, carried through to the
/// candidate or rejection for reporting.
pub fn parse_row<R>(row: &R, user_id: UserId, target_year: i32, row_ordinal: usize) -> RowOutcome
where
    R: RowSource + ?Sized,
{
    let reject = |reason: RejectReason, detail: String| {
        debug!("Row {} rejected ({}): {}", row_ordinal, reason, detail);
        RowOutcome::Rejected(RowRejection::new(row_ordinal, reason).with_detail(detail))
    };

    let observation_date = match get_field(row, columns::DATE) {
        None => return reject(RejectReason::InvalidDate, "date is empty".to_string()),
        Some(raw) => match parse_observation_date(raw) {
            Some(date) => date,
            None => {
                return reject(
                    RejectReason::InvalidDate,
                    format!("unparsable date '{}'", raw),
                );
            }
        },
    };

    let (common_name, scientific_name) = match (
        get_field(row, columns::COMMON_NAME),
        get_field(row, columns::SCIENTIFIC_NAME),
    ) {
        (Some(common), Some(scientific)) => (common, scientific),
        (None, _) => {
            return reject(
                RejectReason::MissingField,
                format!("'{}' is empty", columns::COMMON_NAME),
            );
        }
        (_, None) => {
            return reject(
                RejectReason::MissingField,
                format!("'{}' is empty", columns::SCIENTIFIC_NAME),
            );
        }
    };

    if observation_date.year() != target_year {
        return reject(
            RejectReason::OutOfRange,
            format!("{} is outside {}", observation_date, target_year),
        );
    }

    let category = columns::CATEGORY_ALIASES
        .iter()
        .find_map(|column| get_field(row, column));
    if !is_countable(category, common_name, scientific_name) {
        return reject(
            RejectReason::NotCountable,
            format!("'{}' is not a countable species", common_name),
        );
    }

    RowOutcome::Candidate(CandidateObservation {
        user_id,
        submission_id: parse_optional_string(row, columns::SUBMISSION_ID),
        common_name: common_name.to_string(),
        scientific_name: scientific_name.to_string(),
        taxonomic_order: parse_optional_i64(row, columns::TAXONOMIC_ORDER),
        count: parse_optional_string(row, columns::COUNT),
        state_province: parse_optional_string(row, columns::STATE_PROVINCE),
        county: parse_optional_string(row, columns::COUNTY),
        location: parse_optional_string(row, columns::LOCATION),
        latitude: parse_optional_f64(row, columns::LATITUDE),
        longitude: parse_optional_f64(row, columns::LONGITUDE),
        observation_date,
        row_ordinal,
    })
}
