//! Upload pipeline orchestration
//!
//! Parsing runs before any lock is taken. Deduplication and the commit run
//! inside the uploader's import lock, so two overlapping uploads from one
//! user cannot both pass the duplicate check. A file that fails validation
//! leaves the store untouched.

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::stats::{DateRange, ImportStats};
use crate::app::models::UserId;
use crate::app::services::ebird_csv_parser::EbirdCsvParser;
use crate::app::services::observation_store::{Deduplicator, ObservationStore};
use crate::app::services::species_aggregator::summarize_year;
use crate::{Error, Result};

/// Imports eBird exports into the observation store
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use bigyear::app::services::importer::ImportProcessor;
/// use bigyear::app::services::observation_store::ObservationStore;
///
/// # async fn example(user_id: u64, bytes: &[u8]) -> bigyear::Result<()> {
/// let store = Arc::new(ObservationStore::new());
/// let importer = ImportProcessor::new(store, 2026, 10 * 1024 * 1024);
///
/// let stats = importer.import_bytes(user_id, Some("MyEBirdData.csv"), bytes).await?;
/// println!("Imported {} of {} rows", stats.imported, stats.total_rows);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ImportProcessor {
    store: Arc<ObservationStore>,
    parser: EbirdCsvParser,
    max_upload_bytes: usize,
}

impl ImportProcessor {
    pub fn new(store: Arc<ObservationStore>, competition_year: i32, max_upload_bytes: usize) -> Self {
        Self {
            store,
            parser: EbirdCsvParser::new(competition_year),
            max_upload_bytes,
        }
    }

    pub fn competition_year(&self) -> i32 {
        self.parser.target_year()
    }

    /// Check the upload envelope before parsing
    pub fn validate_upload(&self, file_name: Option<&str>, size: usize) -> Result<()> {
        if let Some(name) = file_name {
            if !name.to_ascii_lowercase().ends_with(".csv") {
                return Err(Error::validation("File must be a CSV file"));
            }
        }
        if size > self.max_upload_bytes {
            return Err(Error::payload_too_large(size, self.max_upload_bytes));
        }
        Ok(())
    }

    /// Import an uploaded export for a user
    pub async fn import_bytes(
        &self,
        user_id: UserId,
        file_name: Option<&str>,
        content: &[u8],
    ) -> Result<ImportStats> {
        self.import_bytes_at(user_id, file_name, content, Utc::now())
            .await
    }

    pub async fn import_bytes_at(
        &self,
        user_id: UserId,
        file_name: Option<&str>,
        content: &[u8],
        uploaded_at: DateTime<Utc>,
    ) -> Result<ImportStats> {
        self.validate_upload(file_name, content.len())?;
        if self.store.user(user_id).await.is_none() {
            return Err(Error::not_found("User", user_id));
        }

        let parsed = self.parser.parse_bytes(user_id, content)?;
        let candidate_count = parsed.candidates.len();

        let _import_guard = self.store.import_lock(user_id).await;
        debug!("Import lock acquired for user {}", user_id);

        let mut deduplicator = Deduplicator::new(self.store.dedup_keys_for(user_id).await);
        let (accepted, duplicates) = deduplicator.partition(parsed.candidates);

        let commit = self
            .store
            .commit_import(user_id, accepted, uploaded_at)
            .await?;

        let year = self.competition_year();
        let species_count = self
            .store
            .read(|view| summarize_year(user_id, year, view.observations_for(user_id)).species_count())
            .await;

        let stats = ImportStats::from_parts(
            &parsed.stats,
            parsed.rejections,
            commit.inserted,
            duplicates + commit.duplicates,
            species_count,
            DateRange {
                earliest: commit.earliest,
                latest: commit.latest,
            },
        );

        info!(
            "Import complete for user {}: {} rows, {} candidates, {} imported, {} duplicates, {} species",
            user_id, stats.total_rows, candidate_count, stats.imported, stats.duplicates, species_count
        );
        Ok(stats)
    }

    /// Import an export file from disk
    pub async fn import_file(&self, user_id: UserId, path: &Path) -> Result<ImportStats> {
        let content = tokio::fs::read(path)
            .await
            .map_err(|e| Error::io(format!("Failed to read file {}", path.display()), e))?;
        let file_name = path.file_name().and_then(|name| name.to_str());
        self.import_bytes(user_id, file_name, &content).await
    }
}
