//! Test utilities for import pipeline testing

use std::sync::Arc;

use crate::app::models::UserId;
use crate::app::services::importer::ImportProcessor;
use crate::app::services::observation_store::ObservationStore;
use crate::app::services::observation_store::tests::fixed_time;


pub const YEAR: i32 = 2026;
pub const UPLOAD_LIMIT: usize = 64 * 1024;

/// Store with one registered user and an importer over it
pub async fn importer_with_user(email: &str) -> (ImportProcessor, Arc<ObservationStore>, UserId) {
    let store = Arc::new(ObservationStore::new());
    let (user, _) = store.find_or_create_user(email, fixed_time()).await;
    let importer = ImportProcessor::new(Arc::clone(&store), YEAR, UPLOAD_LIMIT);
    (importer, store, user.id)
}
