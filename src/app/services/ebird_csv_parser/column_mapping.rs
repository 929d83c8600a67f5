//! Column mapping for eBird export headers
//!
//! This module validates the header row of an export and gives row parsing a
//! name-based view over each record, so the same row logic works for CSV
//! records and for plain column-name maps.

use crate::constants::columns;
use crate::{Error, Result};
use csv::StringRecord;
use std::collections::HashMap;

/// Name-based access to one export row
pub trait RowSource {
    /// Raw value of the named column, if the column exists
    fn field(&self, column: &str) -> Option<&str>;
}

impl RowSource for HashMap<String, String> {
    fn field(&self, column: &str) -> Option<&str> {
        self.get(column).map(String::as_str)
    }
}

impl RowSource for HashMap<&str, &str> {
    fn field(&self, column: &str) -> Option<&str> {
        self.get(column).copied()
    }
}

/// Column name to position mapping for a validated header
#[derive(Debug, Clone)]
pub struct ColumnMapping {
    /// Column name to index mapping
    pub name_to_index: HashMap<String, usize>,
}

impl ColumnMapping {
    /// Analyze the header row and confirm the required columns are present
    pub fn analyze(headers: &StringRecord) -> Result<Self> {
        let mut name_to_index = HashMap::new();

        for (index, header) in headers.iter().enumerate() {
            // Excel-saved exports carry a byte order mark on the first header
            let column_name = header.trim_start_matches('\u{feff}').trim().to_string();
            if column_name.is_empty() {
                continue;
            }
            name_to_index.entry(column_name).or_insert(index);
        }

        let missing: Vec<&str> = columns::REQUIRED
            .iter()
            .copied()
            .filter(|column| !name_to_index.contains_key(*column))
            .collect();

        if !missing.is_empty() {
            return Err(Error::validation(format!(
                "Missing required columns: {}",
                missing.join(", ")
            )));
        }

        Ok(Self { name_to_index })
    }

    /// Position of the named column
    pub fn index_of(&self, column: &str) -> Option<usize> {
        self.name_to_index.get(column).copied()
    }

    /// Whether the header carries the named column
    pub fn has_column(&self, column: &str) -> bool {
        self.name_to_index.contains_key(column)
    }
}

/// A CSV record viewed through its header mapping
#[derive(Debug, Clone, Copy)]
pub struct MappedRecord<'a> {
    record: &'a StringRecord,
    mapping: &'a ColumnMapping,
}

impl<'a> MappedRecord<'a> {
    pub fn new(record: &'a StringRecord, mapping: &'a ColumnMapping) -> Self {
        Self { record, mapping }
    }
}

impl RowSource for MappedRecord<'_> {
    fn field(&self, column: &str) -> Option<&str> {
        self.mapping
            .index_of(column)
            .and_then(|index| self.record.get(index))
    }
}
