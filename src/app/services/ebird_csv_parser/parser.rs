//! Core eBird CSV parser implementation
//!
//! This module validates the header once and then classifies every data row,
//! accumulating rejections instead of failing on the first bad row. Only
//! file-level problems (empty file, unreadable header, missing required
//! columns) are errors.

use std::path::Path;
use tracing::{debug, info};

use super::column_mapping::{ColumnMapping, MappedRecord};
use super::record_parser::{RowOutcome, parse_row};
use super::stats::{ParseResult, RejectReason, RowRejection};
use crate::app::models::UserId;
use crate::{Error, Result};

/// eBird "MyEBirdData.csv" parser bound to one competition year
#[derive(Debug, Clone, Copy)]
pub struct EbirdCsvParser {
    target_year: i32,
}

impl EbirdCsvParser {
    /// Create a parser that accepts sightings dated within `target_year`
    pub fn new(target_year: i32) -> Self {
        Self { target_year }
    }

    pub fn target_year(&self) -> i32 {
        self.target_year
    }

    /// Parse an export already held in memory
    pub fn parse_bytes(&self, user_id: UserId, content: &[u8]) -> Result<ParseResult> {
        if content.iter().all(|b| b.is_ascii_whitespace()) {
            return Err(Error::validation("CSV file is empty"));
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(content);

        let headers = reader
            .headers()
            .map_err(|e| Error::csv_parsing("Failed to read CSV header row", Some(e)))?
            .clone();
        let mapping = ColumnMapping::analyze(&headers)?;
        debug!("Header maps {} columns", mapping.name_to_index.len());

        let mut result = ParseResult::default();

        for (index, record) in reader.records().enumerate() {
            let row_ordinal = index + 1;
            result.stats.total_rows += 1;

            let outcome = match record {
                Ok(record) => parse_row(
                    &MappedRecord::new(&record, &mapping),
                    user_id,
                    self.target_year,
                    row_ordinal,
                ),
                Err(e) => {
                    debug!("Row {} could not be decoded: {}", row_ordinal, e);
                    RowOutcome::Rejected(
                        RowRejection::new(row_ordinal, RejectReason::MalformedRow)
                            .with_detail(e.to_string()),
                    )
                }
            };

            match outcome {
                RowOutcome::Candidate(candidate) => {
                    result.stats.candidates += 1;
                    result.candidates.push(candidate);
                }
                RowOutcome::Rejected(rejection) => {
                    result.stats.record_rejection(rejection.reason);
                    result.rejections.push(rejection);
                }
            }
        }

        info!(
            "Parsed {} candidates from {} rows ({} rejected)",
            result.stats.candidates,
            result.stats.total_rows,
            result.stats.rejected()
        );

        Ok(result)
    }

    /// Parse an export file from disk
    pub fn parse_file(&self, user_id: UserId, file_path: &Path) -> Result<ParseResult> {
        info!("Parsing eBird export: {}", file_path.display());
        let content = std::fs::read(file_path)
            .map_err(|e| Error::io(format!("Failed to read file {}", file_path.display()), e))?;
        self.parse_bytes(user_id, &content)
    }
}
