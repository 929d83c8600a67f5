//! Test utilities for the service facade

use std::sync::Arc;

use crate::app::api::{BigYearService, TokenResponse};
use crate::app::services::auth::LinkMailer;
use crate::app::services::auth::tests::RecordingMailer;
use crate::app::services::observation_store::ObservationStore;
use crate::config::Config;


pub fn service() -> (BigYearService, Arc<RecordingMailer>) {
    let mailer = Arc::new(RecordingMailer::default());
    let link_mailer: Arc<dyn LinkMailer> = mailer.clone();
    let service = BigYearService::new(Config::default(), ObservationStore::new(), link_mailer);
    (service, mailer)
}

/// Full magic-link login for `email`
pub async fn login(
    service: &BigYearService,
    mailer: &RecordingMailer,
    email: &str,
) -> TokenResponse {
    service.request_magic_link(email).await.unwrap();
    let link = mailer.last_link().unwrap();
    let token = link.rsplit("token=").next().unwrap().to_string();
    service.verify_magic_link(&token).await.unwrap()
}
