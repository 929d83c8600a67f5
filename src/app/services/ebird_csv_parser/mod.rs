//! eBird CSV parser for "MyEBirdData.csv" personal data exports
//!
//! This module turns an uploaded export into candidate observations. It is a
//! pure transform: nothing is persisted here, and individual bad rows are
//! reported as rejections rather than errors so the caller can accumulate
//! statistics across the whole file.
//!
//! ## Architecture
//!
//! The parser is organized into logical components:
//! - [`parser`] - File-level orchestration (header validation, row iteration)
//! - [`column_mapping`] - Header analysis and the [`RowSource`] row abstraction
//! - [`record_parser`] - Single-row classification into candidate or rejection
//! - [`field_parsers`] - Utility functions for field parsing and validation
//! - [`taxonomy`] - Countable-species rules
//! - [`stats`] - Parsing statistics and result structures
//!
//! ## Usage
//!
//! ```rust
//! use bigyear::app::services::ebird_csv_parser::EbirdCsvParser;
//!
//! # fn example(bytes: &[u8]) -> bigyear::Result<()> {
//! let parser = EbirdCsvParser::new(2026);
//! let result = parser.parse_bytes(1, bytes)?;
//!
//! println!("{} candidates from {} rows",
//!          result.candidates.len(),
//!          result.stats.total_rows);
//! # Ok(())
//! # }
//! ```

pub mod column_mapping;
pub mod field_parsers;
pub mod parser;
pub mod record_parser;
pub mod stats;
pub mod taxonomy;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use column_mapping::{ColumnMapping, MappedRecord, RowSource};
pub use parser::EbirdCsvParser;
pub use record_parser::{RowOutcome, parse_row};
pub use stats::{ParseResult, ParseStats, RejectReason, RowRejection};
pub use taxonomy::{TaxonCategory, is_countable};
