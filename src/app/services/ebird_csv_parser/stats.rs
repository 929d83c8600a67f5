//! Parsing statistics and result structures for eBird CSV processing
//!
//! This module provides types for tracking per-row rejections and
//! organizing parsed candidates for the deduplication stage.

use crate::app::models::CandidateObservation;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a row did not become a candidate observation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// Observation date missing or unparsable
    InvalidDate,
    /// Hybrid, domestic, slash, spuh or similar non-species taxon
    NotCountable,
    /// Dated outside the competition year
    OutOfRange,
    /// Common or scientific name empty
    MissingField,
    /// Row could not be decoded at all
    MalformedRow,
}

impl RejectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectReason::InvalidDate => "invalid_date",
            RejectReason::NotCountable => "not_countable",
            RejectReason::OutOfRange => "out_of_range",
            RejectReason::MissingField => "missing_field",
            RejectReason::MalformedRow => "malformed_row",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rejected row with its 1-based data row number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowRejection {
    pub row: usize,
    pub reason: RejectReason,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl RowRejection {
    pub fn new(row: usize, reason: RejectReason) -> Self {
        Self {
            row,
            reason,
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Per-file parsing statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParseStats {
    /// Data rows encountered (header excluded)
    pub total_rows: usize,
    /// Rows that became candidate observations
    pub candidates: usize,
    pub invalid_date: usize,
    pub not_countable: usize,
    pub out_of_range: usize,
    pub missing_field: usize,
    pub malformed_row: usize,
}

impl ParseStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a rejection under its reason
    pub fn record_rejection(&mut self, reason: RejectReason) {
        match reason {
            RejectReason::InvalidDate => self.invalid_date += 1,
            RejectReason::NotCountable => self.not_countable += 1,
            RejectReason::OutOfRange => self.out_of_range += 1,
            RejectReason::MissingField => self.missing_field += 1,
            RejectReason::MalformedRow => self.malformed_row += 1,
        }
    }

    /// Total rows rejected by the parser
    pub fn rejected(&self) -> usize {
        self.not_countable + self.out_of_range + self.other_rejected()
    }

    /// Rejections outside the informational buckets (invalid date, missing field, malformed)
    pub fn other_rejected(&self) -> usize {
        self.invalid_date + self.missing_field + self.malformed_row
    }
}

/// Parsing result with candidates, rejections and statistics
#[derive(Debug, Clone, Default)]
pub struct ParseResult {
    /// Rows that passed every row-level check, in file order
    pub candidates: Vec<CandidateObservation>,

    /// Rows that did not, in file order
    pub rejections: Vec<RowRejection>,

    pub stats: ParseStats,
}
