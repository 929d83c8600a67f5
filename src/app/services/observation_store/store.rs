//! In-memory observation store with per-user import serialization
//!
//! All mutable state lives behind one `RwLock`. Readers run a closure over a
//! [`StoreView`] so they always see a consistent snapshot; an import commits
//! every accepted row inside a single write-lock section, so a half-applied
//! import is never visible.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
use tracing::{debug, info};

use super::deduplication::DedupKey;
use crate::app::models::{CandidateObservation, Observation, PrivacyLevel, User, UserId};
use crate::{Error, Result};

/// Result of committing one import
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommitOutcome {
    /// Rows stored by this commit
    pub inserted: usize,
    /// Rows dropped because their key was already stored
    pub duplicates: usize,
    pub earliest: Option<NaiveDate>,
    pub latest: Option<NaiveDate>,
}

/// Profile changes; `None` leaves the field as is
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub privacy_level: Option<PrivacyLevel>,
}

#[derive(Debug, Default)]
struct StoreState {
    users: BTreeMap<UserId, User>,
    user_ids_by_email: HashMap<String, UserId>,
    observations: HashMap<UserId, Vec<Observation>>,
    dedup_index: HashMap<UserId, HashSet<DedupKey>>,
    last_upload: HashMap<UserId, DateTime<Utc>>,
    next_user_id: UserId,
    next_sequence: u64,
}

impl StoreState {
    fn insert_user(&mut self, user: User) {
        self.next_user_id = self.next_user_id.max(user.id + 1);
        self.user_ids_by_email.insert(user.email.clone(), user.id);
        self.users.insert(user.id, user);
    }

    fn insert_observation(&mut self, observation: Observation) -> bool {
        let key = DedupKey::for_observation(&observation);
        if !self
            .dedup_index
            .entry(observation.user_id)
            .or_default()
            .insert(key)
        {
            return false;
        }

        self.next_sequence = self.next_sequence.max(observation.sequence + 1);
        let last_upload = self
            .last_upload
            .entry(observation.user_id)
            .or_insert(observation.uploaded_at);
        *last_upload = (*last_upload).max(observation.uploaded_at);
        self.observations
            .entry(observation.user_id)
            .or_default()
            .push(observation);
        true
    }
}

/// Read-only view over committed store state
#[derive(Debug, Clone, Copy)]
pub struct StoreView<'a> {
    state: &'a StoreState,
}

impl<'a> StoreView<'a> {
    /// All users in id order
    pub fn users(self) -> impl Iterator<Item = &'a User> {
        self.state.users.values()
    }

    pub fn user(&self, user_id: UserId) -> Option<&'a User> {
        self.state.users.get(&user_id)
    }

    pub fn user_count(&self) -> usize {
        self.state.users.len()
    }

    /// A user's observations in insertion order
    pub fn observations_for(&self, user_id: UserId) -> &'a [Observation] {
        self.state
            .observations
            .get(&user_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn observation_count(&self) -> usize {
        self.state.observations.values().map(Vec::len).sum()
    }

    pub fn last_upload(&self, user_id: UserId) -> Option<DateTime<Utc>> {
        self.state.last_upload.get(&user_id).copied()
    }
}

/// Shared observation store
#[derive(Debug, Default)]
pub struct ObservationStore {
    state: RwLock<StoreState>,
    import_locks: Mutex<HashMap<UserId, Arc<Mutex<()>>>>,
}

impl ObservationStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from previously persisted users and observations
    ///
    /// Duplicate keys in the input keep their first occurrence.
    pub fn from_parts(users: Vec<User>, mut observations: Vec<Observation>) -> Result<Self> {
        let mut state = StoreState {
            next_user_id: 1,
            ..StoreState::default()
        };

        for user in users {
            if state.user_ids_by_email.contains_key(&user.email) {
                return Err(Error::validation(format!(
                    "Duplicate email in stored users: {}",
                    user.email
                )));
            }
            state.insert_user(user);
        }

        observations.sort_by_key(|observation| observation.sequence);
        let total = observations.len();
        let mut restored = 0;
        for observation in observations {
            if !state.users.contains_key(&observation.user_id) {
                return Err(Error::not_found("User", observation.user_id));
            }
            if state.insert_observation(observation) {
                restored += 1;
            }
        }

        if restored < total {
            debug!("Dropped {} duplicate stored observations", total - restored);
        }
        info!(
            "Restored store with {} users and {} observations",
            state.users.len(),
            restored
        );

        Ok(Self {
            state: RwLock::new(state),
            import_locks: Mutex::new(HashMap::new()),
        })
    }

    /// Acquire the import critical section for a user
    ///
    /// Imports for the same user queue in arrival order; other users are
    /// never blocked.
    pub async fn import_lock(&self, user_id: UserId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.import_locks.lock().await;
            Arc::clone(locks.entry(user_id).or_default())
        };
        lock.lock_owned().await
    }

    /// Run a read-only closure over a consistent view of committed data
    pub async fn read<R>(&self, f: impl FnOnce(StoreView<'_>) -> R) -> R {
        let state = self.state.read().await;
        f(StoreView { state: &*state })
    }

    /// Resolve a user by normalized email, creating one when absent
    ///
    /// Returns the user and whether it was created.
    pub async fn find_or_create_user(&self, email: &str, now: DateTime<Utc>) -> (User, bool) {
        let mut state = self.state.write().await;
        if let Some(user) = state
            .user_ids_by_email
            .get(email)
            .and_then(|id| state.users.get(id))
        {
            return (user.clone(), false);
        }

        let id = state.next_user_id.max(1);
        let user = User::new(id, email.to_string(), now);
        state.insert_user(user.clone());
        info!("Created user {} for {}", id, email);
        (user, true)
    }

    pub async fn user(&self, user_id: UserId) -> Option<User> {
        self.state.read().await.users.get(&user_id).cloned()
    }

    pub async fn user_by_email(&self, email: &str) -> Option<User> {
        let state = self.state.read().await;
        state
            .user_ids_by_email
            .get(email)
            .and_then(|id| state.users.get(id))
            .cloned()
    }

    /// Apply a profile update
    pub async fn update_profile(&self, user_id: UserId, update: ProfileUpdate) -> Result<User> {
        let mut state = self.state.write().await;
        let user = state
            .users
            .get_mut(&user_id)
            .ok_or_else(|| Error::not_found("User", user_id))?;

        if let Some(name) = update.name {
            user.name = name;
        }
        if let Some(privacy_level) = update.privacy_level {
            user.privacy_level = privacy_level;
        }
        debug!("Updated profile for user {}", user_id);
        Ok(user.clone())
    }

    /// Stamp a successful login
    pub async fn record_login(&self, user_id: UserId, at: DateTime<Utc>) -> Result<User> {
        let mut state = self.state.write().await;
        let user = state
            .users
            .get_mut(&user_id)
            .ok_or_else(|| Error::not_found("User", user_id))?;
        user.last_login = Some(at);
        Ok(user.clone())
    }

    /// Keys of every stored observation for a user
    pub async fn dedup_keys_for(&self, user_id: UserId) -> HashSet<DedupKey> {
        self.state
            .read()
            .await
            .dedup_index
            .get(&user_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Store accepted candidates in one atomic step
    ///
    /// Every key is checked against the index again inside the write lock,
    /// so a caller that skipped the import lock still cannot store a
    /// duplicate.
    pub async fn commit_import(
        &self,
        user_id: UserId,
        accepted: Vec<CandidateObservation>,
        uploaded_at: DateTime<Utc>,
    ) -> Result<CommitOutcome> {
        let mut state = self.state.write().await;
        if !state.users.contains_key(&user_id) {
            return Err(Error::not_found("User", user_id));
        }
        if let Some(foreign) = accepted.iter().find(|c| c.user_id != user_id) {
            return Err(Error::validation(format!(
                "Row {} belongs to user {}, not {}",
                foreign.row_ordinal, foreign.user_id, user_id
            )));
        }

        let mut outcome = CommitOutcome::default();
        for candidate in accepted {
            let sequence = state.next_sequence;
            let date = candidate.observation_date;
            if state.insert_observation(candidate.into_observation(sequence, uploaded_at)) {
                outcome.inserted += 1;
                outcome.earliest = Some(outcome.earliest.map_or(date, |d| d.min(date)));
                outcome.latest = Some(outcome.latest.map_or(date, |d| d.max(date)));
            } else {
                outcome.duplicates += 1;
            }
        }

        if outcome.inserted > 0 {
            state.last_upload.insert(user_id, uploaded_at);
        }

        debug!(
            "Committed {} observations for user {} ({} late duplicates)",
            outcome.inserted, user_id, outcome.duplicates
        );
        Ok(outcome)
    }

    /// Clone all users and observations for persistence
    pub async fn export_parts(&self) -> (Vec<User>, Vec<Observation>) {
        let state = self.state.read().await;
        let users = state.users.values().cloned().collect();
        let mut observations: Vec<Observation> = state
            .observations
            .values()
            .flat_map(|list| list.iter().cloned())
            .collect();
        observations.sort_by_key(|observation| observation.sequence);
        (users, observations)
    }
}
