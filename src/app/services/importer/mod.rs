//! CSV import pipeline
//!
//! Ties the parser, the deduplicator and the store together for one upload
//! and reports the statistics the uploader sees.
//!
//! ```text
//! bytes -> EbirdCsvParser -> [import lock] -> Deduplicator -> commit -> ImportStats
//! ```

pub mod processor;
pub mod stats;

#[cfg(test)]
pub mod tests;

pub use processor::ImportProcessor;
pub use stats::{DateRange, ImportStats};
