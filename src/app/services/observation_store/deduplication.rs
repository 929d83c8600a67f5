//! Natural-key deduplication for eBird sightings
//!
//! A sighting is identified by user, species, date and checklist. Exports that
//! omit the checklist identifier fall back to the state/province, since
//! repeated exports commonly re-list the same checklist.

use crate::app::models::{CandidateObservation, Observation, UserId};
use chrono::NaiveDate;
use std::collections::HashSet;
use tracing::debug;

/// Identity of one sighting for duplicate detection
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DedupKey {
    /// Keyed by checklist when the row carries a submission identifier
    Submission {
        user_id: UserId,
        scientific_name: String,
        observation_date: NaiveDate,
        submission_id: String,
    },
    /// Fallback when the submission identifier is absent
    Location {
        user_id: UserId,
        scientific_name: String,
        observation_date: NaiveDate,
        state_province: Option<String>,
    },
}

impl DedupKey {
    /// Build a key from its parts, choosing the variant by submission presence
    pub fn from_parts(
        user_id: UserId,
        scientific_name: &str,
        observation_date: NaiveDate,
        submission_id: Option<&str>,
        state_province: Option<&str>,
    ) -> Self {
        match submission_id {
            Some(submission_id) => DedupKey::Submission {
                user_id,
                scientific_name: scientific_name.to_string(),
                observation_date,
                submission_id: submission_id.to_string(),
            },
            None => DedupKey::Location {
                user_id,
                scientific_name: scientific_name.to_string(),
                observation_date,
                state_province: state_province.map(str::to_string),
            },
        }
    }

    pub fn for_candidate(candidate: &CandidateObservation) -> Self {
        Self::from_parts(
            candidate.user_id,
            &candidate.scientific_name,
            candidate.observation_date,
            candidate.submission_id.as_deref(),
            candidate.state_province.as_deref(),
        )
    }

    pub fn for_observation(observation: &Observation) -> Self {
        Self::from_parts(
            observation.user_id,
            &observation.scientific_name,
            observation.observation_date,
            observation.submission_id.as_deref(),
            observation.state_province.as_deref(),
        )
    }

    pub fn user_id(&self) -> UserId {
        match self {
            DedupKey::Submission { user_id, .. } | DedupKey::Location { user_id, .. } => *user_id,
        }
    }
}

/// Outcome of checking one candidate against known sightings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DedupDecision {
    Accept,
    Duplicate,
}

/// Decide a single candidate against a user's stored observations
pub fn decide(candidate: &CandidateObservation, existing: &[Observation]) -> DedupDecision {
    let key = DedupKey::for_candidate(candidate);
    if existing
        .iter()
        .any(|observation| DedupKey::for_observation(observation) == key)
    {
        DedupDecision::Duplicate
    } else {
        DedupDecision::Accept
    }
}

/// Running duplicate filter for one import
///
/// Seeded with the keys already stored for the user; every accepted candidate
/// adds its key, so repeats within the same file are caught too.
#[derive(Debug, Clone, Default)]
pub struct Deduplicator {
    seen: HashSet<DedupKey>,
    accepted: usize,
    duplicates: usize,
}

impl Deduplicator {
    pub fn new(existing: HashSet<DedupKey>) -> Self {
        Self {
            seen: existing,
            accepted: 0,
            duplicates: 0,
        }
    }

    /// Check a candidate and remember it when accepted
    pub fn check(&mut self, candidate: &CandidateObservation) -> DedupDecision {
        let key = DedupKey::for_candidate(candidate);
        if self.seen.insert(key) {
            self.accepted += 1;
            DedupDecision::Accept
        } else {
            self.duplicates += 1;
            debug!(
                "Row {} duplicates an existing sighting of {} on {}",
                candidate.row_ordinal, candidate.scientific_name, candidate.observation_date
            );
            DedupDecision::Duplicate
        }
    }

    /// Split candidates into accepted rows (file order kept) and a duplicate count
    pub fn partition(
        &mut self,
        candidates: Vec<CandidateObservation>,
    ) -> (Vec<CandidateObservation>, usize) {
        let before = self.duplicates;
        let accepted = candidates
            .into_iter()
            .filter(|candidate| self.check(candidate) == DedupDecision::Accept)
            .collect();
        (accepted, self.duplicates - before)
    }

    pub fn accepted(&self) -> usize {
        self.accepted
    }

    pub fn duplicates(&self) -> usize {
        self.duplicates
    }
}
