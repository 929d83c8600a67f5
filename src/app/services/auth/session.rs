//! Bearer sessions issued after magic-link verification

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use super::generate_token;
use crate::app::models::UserId;
use crate::{Error, Result};

/// An active session credential
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user_id: UserId,
    pub expires_at: DateTime<Utc>,
}

/// Server-side session registry
#[derive(Debug)]
pub struct SessionStore {
    ttl: Duration,
    sessions: RwLock<HashMap<String, Session>>,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub async fn create(&self, user_id: UserId) -> Session {
        self.create_at(user_id, Utc::now()).await
    }

    pub async fn create_at(&self, user_id: UserId, now: DateTime<Utc>) -> Session {
        let session = Session {
            token: generate_token(),
            user_id,
            expires_at: now + self.ttl,
        };
        self.sessions
            .write()
            .await
            .insert(session.token.clone(), session.clone());
        debug!("Opened session for user {}", user_id);
        session
    }

    /// Resolve a bearer token to its user
    pub async fn resolve(&self, token: &str) -> Result<UserId> {
        self.resolve_at(token, Utc::now()).await
    }

    pub async fn resolve_at(&self, token: &str, now: DateTime<Utc>) -> Result<UserId> {
        let expires_at = {
            let sessions = self.sessions.read().await;
            let session = sessions
                .get(token)
                .ok_or_else(|| Error::unauthorized("Unknown session"))?;
            if now < session.expires_at {
                return Ok(session.user_id);
            }
            session.expires_at
        };

        self.sessions.write().await.remove(token);
        debug!("Session expired at {}", expires_at);
        Err(Error::unauthorized("Session expired"))
    }

    /// Revoke a session; returns whether it existed
    pub async fn revoke(&self, token: &str) -> bool {
        self.sessions.write().await.remove(token).is_some()
    }

    pub async fn active_sessions(&self) -> usize {
        self.sessions.read().await.len()
    }
}
