//! Import statistics returned to the uploader

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::app::services::ebird_csv_parser::{ParseStats, RowRejection};

/// Dates spanned by the rows stored by one import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub earliest: Option<NaiveDate>,
    pub latest: Option<NaiveDate>,
}

/// Outcome of one CSV import
///
/// `imported + duplicates + not_countable + out_of_range + other_rejected`
/// always equals `total_rows`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportStats {
    /// User's distinct species for the competition year after this import
    pub species_count: usize,
    pub imported: usize,
    pub duplicates: usize,
    pub total_rows: usize,
    pub not_countable: usize,
    pub out_of_range: usize,
    /// Invalid dates, missing names and undecodable rows
    pub other_rejected: usize,
    pub date_range: DateRange,
    pub rejections: Vec<RowRejection>,
}

impl ImportStats {
    /// Combine parser statistics with the dedup and commit outcome
    pub fn from_parts(
        parse: &ParseStats,
        rejections: Vec<RowRejection>,
        imported: usize,
        duplicates: usize,
        species_count: usize,
        date_range: DateRange,
    ) -> Self {
        let other_rejected = parse
            .total_rows
            .saturating_sub(imported)
            .saturating_sub(duplicates)
            .saturating_sub(parse.not_countable)
            .saturating_sub(parse.out_of_range);

        Self {
            species_count,
            imported,
            duplicates,
            total_rows: parse.total_rows,
            not_countable: parse.not_countable,
            out_of_range: parse.out_of_range,
            other_rejected,
            date_range,
            rejections,
        }
    }

    /// Rows that did not become new observations
    pub fn skipped(&self) -> usize {
        self.total_rows - self.imported
    }
}
