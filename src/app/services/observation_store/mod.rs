//! Observation store for accepted eBird sightings
//!
//! The store is the only shared mutable resource in the engine. It holds
//! users and their deduplicated observations in memory, serializes imports
//! per user, and can be snapshotted to Parquet for restarts.
//!
//! ## Components
//!
//! - [`deduplication`] - Natural-key duplicate detection
//! - [`store`] - Locked in-memory state, import lock map and read views
//! - [`snapshot`] - Parquet persistence via polars

pub mod deduplication;
pub mod snapshot;
pub mod store;

#[cfg(test)]
pub mod tests;

pub use deduplication::{DedupDecision, DedupKey, Deduplicator, decide};
pub use snapshot::{load_from_dir, save_to_dir};
pub use store::{CommitOutcome, ObservationStore, ProfileUpdate, StoreView};

use std::path::Path;
use tracing::info;

use crate::Result;

impl ObservationStore {
    /// Restore from a snapshot directory, or start empty when none exists
    pub fn open(dir: &Path) -> Result<Self> {
        match load_from_dir(dir)? {
            Some((users, observations)) => Self::from_parts(users, observations),
            None => {
                info!("No snapshot in {}, starting empty", dir.display());
                Ok(Self::new())
            }
        }
    }

    /// Write the current state to a snapshot directory
    pub async fn save(&self, dir: &Path) -> Result<()> {
        let (users, observations) = self.export_parts().await;
        let dir = dir.to_path_buf();
        tokio::task::spawn_blocking(move || save_to_dir(&dir, &users, &observations))
            .await
            .map_err(|e| crate::Error::processing_interrupted(format!("Snapshot task failed: {}", e)))?
    }
}
