//! Single-use magic-link tokens
//!
//! A token is bound to one email and expires after a fixed window. Redeeming
//! removes it, so a second attempt fails even inside the window. Issuing a new
//! link for an email drops the previous outstanding link for that email.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;
use tracing::debug;

use super::generate_token;
use crate::{Error, Result};

/// An issued link, returned to the caller for delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MagicLink {
    pub token: String,
    pub email: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct PendingLink {
    email: String,
    expires_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct PendingLinks {
    by_token: HashMap<String, PendingLink>,
    token_by_email: HashMap<String, String>,
}

impl PendingLinks {
    fn prune_expired(&mut self, now: DateTime<Utc>) {
        let expired: Vec<String> = self
            .by_token
            .iter()
            .filter(|(_, link)| now >= link.expires_at)
            .map(|(token, _)| token.clone())
            .collect();
        for token in expired {
            if let Some(link) = self.by_token.remove(&token) {
                self.token_by_email.remove(&link.email);
            }
        }
    }
}

/// Issues and redeems magic-link tokens
#[derive(Debug)]
pub struct MagicLinkIssuer {
    ttl: Duration,
    pending: Mutex<PendingLinks>,
}

impl MagicLinkIssuer {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            pending: Mutex::new(PendingLinks::default()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a link for a normalized email
    pub async fn issue(&self, email: &str) -> MagicLink {
        self.issue_at(email, Utc::now()).await
    }

    pub async fn issue_at(&self, email: &str, now: DateTime<Utc>) -> MagicLink {
        let mut pending = self.pending.lock().await;
        pending.prune_expired(now);

        if let Some(previous) = pending.token_by_email.remove(email) {
            pending.by_token.remove(&previous);
            debug!("Replaced outstanding magic link for {}", email);
        }

        let token = generate_token();
        let expires_at = now + self.ttl;
        pending.by_token.insert(
            token.clone(),
            PendingLink {
                email: email.to_string(),
                expires_at,
            },
        );
        pending
            .token_by_email
            .insert(email.to_string(), token.clone());

        MagicLink {
            token,
            email: email.to_string(),
            expires_at,
        }
    }

    /// Redeem a token, returning the email it was issued for
    pub async fn redeem(&self, token: &str) -> Result<String> {
        self.redeem_at(token, Utc::now()).await
    }

    pub async fn redeem_at(&self, token: &str, now: DateTime<Utc>) -> Result<String> {
        let mut pending = self.pending.lock().await;
        let link = pending
            .by_token
            .remove(token)
            .ok_or(Error::InvalidOrExpiredToken)?;
        pending.token_by_email.remove(&link.email);

        if now >= link.expires_at {
            debug!("Magic link for {} expired at {}", link.email, link.expires_at);
            return Err(Error::InvalidOrExpiredToken);
        }
        Ok(link.email)
    }

    /// Outstanding, unexpired links
    pub async fn outstanding(&self, now: DateTime<Utc>) -> usize {
        let mut pending = self.pending.lock().await;
        pending.prune_expired(now);
        pending.by_token.len()
    }
}
