//! Shared fixtures for integration tests

#![allow(dead_code)]

use bigyear::app::services::auth::LinkMailer;
use bigyear::app::services::observation_store::ObservationStore;
use bigyear::{BigYearService, Config};
use std::sync::{Arc, Mutex};

pub const EBIRD_HEADER: &str = "Submission ID,Common Name,Scientific Name,Taxonomic Order,Count,\
State/Province,County,Location ID,Location,Latitude,Longitude,Date,Time,Protocol,\
Duration (Min),All Obs Reported,Distance Traveled (km),Area Covered (ha),\
Number of Observers,Breeding Code,Observation Details,Checklist Comments,ML Catalog Numbers";

/// One export row: (submission, common name, scientific name, state, date)
pub type Row<'a> = (&'a str, &'a str, &'a str, &'a str, &'a str);

pub fn export(rows: &[Row<'_>]) -> String {
    let mut csv = format!("{}\n", EBIRD_HEADER);
    for (submission, common, scientific, state, date) in rows {
        csv.push_str(&format!(
            "{},{},{},1234,1,{},Hamilton,L1,Home,39.1,-84.5,{},07:00 AM,eBird - Stationary Count,10,1,,,1,,,,\n",
            submission, common, scientific, state, date
        ));
    }
    csv
}

/// Three rows: a cardinal reported twice and a domestic goose
pub fn cardinal_and_goose() -> String {
    export(&[
        ("S100", "Northern Cardinal", "Cardinalis cardinalis", "US-OH", "2026-03-01"),
        ("S100", "Northern Cardinal", "Cardinalis cardinalis", "US-OH", "2026-03-01"),
        ("S101", "Domestic Goose", "Anser anser (Domestic type)", "US-OH", "2026-03-02"),
    ])
}

/// Mailer that keeps every link it was asked to send
#[derive(Debug, Default)]
pub struct CapturingMailer {
    links: Mutex<Vec<String>>,
}

impl CapturingMailer {
    pub fn last_token(&self) -> Option<String> {
        let links = self.links.lock().unwrap();
        links
            .last()
            .and_then(|link| link.rsplit("token=").next())
            .map(str::to_string)
    }
}

impl LinkMailer for CapturingMailer {
    fn send_magic_link(&self, _email: &str, link: &str) -> bigyear::Result<()> {
        self.links.lock().unwrap().push(link.to_string());
        Ok(())
    }
}

pub fn service_with_config(config: Config) -> (Arc<BigYearService>, Arc<CapturingMailer>) {
    let mailer = Arc::new(CapturingMailer::default());
    let link_mailer: Arc<dyn LinkMailer> = mailer.clone();
    let service = BigYearService::new(config, ObservationStore::new(), link_mailer);
    (Arc::new(service), mailer)
}

pub fn service() -> (Arc<BigYearService>, Arc<CapturingMailer>) {
    service_with_config(Config::default())
}

/// Log in through the magic-link flow and return (user id, bearer token)
pub async fn login(service: &BigYearService, mailer: &CapturingMailer, email: &str) -> (u64, String) {
    service.request_magic_link(email).await.unwrap();
    let token = mailer.last_token().unwrap();
    let response = service.verify_magic_link(&token).await.unwrap();
    (response.user.id, response.access_token)
}
