//! Magic-link delivery

use tracing::info;

use crate::Result;

/// Delivers a login link to an email address
pub trait LinkMailer: Send + Sync + std::fmt::Debug {
    fn send_magic_link(&self, email: &str, link: &str) -> Result<()>;
}

/// Development mailer that writes the link to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogMailer;

impl LinkMailer for LogMailer {
    fn send_magic_link(&self, email: &str, link: &str) -> Result<()> {
        info!(email, link, "Magic link issued");
        Ok(())
    }
}
