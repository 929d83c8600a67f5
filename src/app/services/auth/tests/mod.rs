//! Test utilities for authentication

use std::sync::Mutex;

use chrono::{DateTime, TimeZone, Utc};

use crate::Result;
use crate::app::services::auth::LinkMailer;

mod session_tests;

pub fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 1, hour, minute, 0).unwrap()
}

/// Mailer that remembers every link it was asked to send
#[derive(Debug, Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<(String, String)>>,
}

impl RecordingMailer {
    pub fn last_link(&self) -> Option<String> {
        self.sent.lock().unwrap().last().map(|(_, link)| link.clone())
    }
}

impl LinkMailer for RecordingMailer {
    fn send_magic_link(&self, email: &str, link: &str) -> Result<()> {
        self.sent
            .lock()
            .unwrap()
            .push((email.to_string(), link.to_string()));
        Ok(())
    }
}
