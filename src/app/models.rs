//! Data models for Big Year processing
//!
//! This module contains the core data structures for birders, their privacy
//! settings and the eBird sightings imported from their CSV exports.

use crate::{Error, Result};
use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Stable user identifier
pub type UserId = u64;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is a valid regex")
});

// =============================================================================
// Privacy Level
// =============================================================================

/// How much of a birder's data other participants may see
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrivacyLevel {
    /// Everything visible, including sighting locations
    #[default]
    Public,
    /// Counts and species names visible, locations hidden
    CountsOnly,
    /// Hidden from the leaderboard; species list always empty
    Private,
}

impl PrivacyLevel {
    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PrivacyLevel::Public => "public",
            PrivacyLevel::CountsOnly => "counts_only",
            PrivacyLevel::Private => "private",
        }
    }

    /// Whether the user takes part in leaderboard listings and participant totals
    pub fn is_listed(&self) -> bool {
        !matches!(self, PrivacyLevel::Private)
    }
}

impl fmt::Display for PrivacyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrivacyLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "public" => Ok(PrivacyLevel::Public),
            "counts_only" => Ok(PrivacyLevel::CountsOnly),
            "private" => Ok(PrivacyLevel::Private),
            other => Err(Error::validation(format!(
                "Invalid privacy level '{}': expected public, counts_only or private",
                other
            ))),
        }
    }
}

// =============================================================================
// User
// =============================================================================

/// Registered birder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,

    /// Lower-cased, trimmed email; unique across users
    pub email: String,

    /// Display name shown on the leaderboard
    pub name: String,

    pub privacy_level: PrivacyLevel,

    pub created_at: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
}

impl User {
    /// Create a new user from a normalized email, deriving the default display name
    pub fn new(id: UserId, email: String, created_at: DateTime<Utc>) -> Self {
        let name = default_display_name(&email);
        Self {
            id,
            email,
            name,
            privacy_level: PrivacyLevel::default(),
            created_at,
            last_login: None,
        }
    }
}

/// Trim, lower-case and sanity-check an email address
pub fn normalize_email(raw: &str) -> Result<String> {
    let email = raw.trim().to_lowercase();
    if EMAIL_PATTERN.is_match(&email) {
        Ok(email)
    } else {
        Err(Error::validation(format!("Invalid email address: '{}'", raw.trim())))
    }
}

/// Title-cased local part of an email ("jane.doe@x.org" -> "Jane.Doe")
pub fn default_display_name(email: &str) -> String {
    let local = email.split('@').next().unwrap_or(email);
    let mut name = String::with_capacity(local.len());
    let mut start_of_word = true;
    for ch in local.chars() {
        if ch.is_alphabetic() {
            if start_of_word {
                name.extend(ch.to_uppercase());
            } else {
                name.extend(ch.to_lowercase());
            }
            start_of_word = false;
        } else {
            name.push(ch);
            start_of_word = true;
        }
    }
    name
}

// =============================================================================
// Observations
// =============================================================================

/// Parsed eBird row that has not yet passed deduplication
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateObservation {
    pub user_id: UserId,
    pub submission_id: Option<String>,
    pub common_name: String,
    pub scientific_name: String,
    pub taxonomic_order: Option<i64>,
    pub count: Option<String>,
    pub state_province: Option<String>,
    pub county: Option<String>,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub observation_date: NaiveDate,

    /// 1-based data row number within the uploaded file
    pub row_ordinal: usize,
}

impl CandidateObservation {
    /// Promote an accepted candidate into a stored observation
    pub fn into_observation(self, sequence: u64, uploaded_at: DateTime<Utc>) -> Observation {
        Observation {
            sequence,
            user_id: self.user_id,
            submission_id: self.submission_id,
            common_name: self.common_name,
            scientific_name: self.scientific_name,
            taxonomic_order: self.taxonomic_order,
            count: self.count,
            state_province: self.state_province,
            county: self.county,
            location: self.location,
            latitude: self.latitude,
            longitude: self.longitude,
            observation_date: self.observation_date,
            row_ordinal: self.row_ordinal,
            uploaded_at,
        }
    }
}

/// One accepted eBird sighting owned by a user
///
/// Observations are immutable once stored; re-imports of the same natural key
/// are rejected as duplicates rather than replacing the stored row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Store-wide insertion order; breaks ties between same-day sightings
    pub sequence: u64,
    pub user_id: UserId,
    pub submission_id: Option<String>,
    pub common_name: String,
    pub scientific_name: String,
    pub taxonomic_order: Option<i64>,
    pub count: Option<String>,
    pub state_province: Option<String>,
    pub county: Option<String>,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub observation_date: NaiveDate,
    pub row_ordinal: usize,
    pub uploaded_at: DateTime<Utc>,
}

impl Observation {
    /// Whether the sighting falls inside the given calendar year
    pub fn in_year(&self, year: i32) -> bool {
        use chrono::Datelike;
        self.observation_date.year() == year
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_privacy_level_round_trip_strings() {
        for level in [
            PrivacyLevel::Public,
            PrivacyLevel::CountsOnly,
            PrivacyLevel::Private,
        ] {
            assert_eq!(level.as_str().parse::<PrivacyLevel>().unwrap(), level);
        }
        assert!("friends_only".parse::<PrivacyLevel>().is_err());
        assert!("Public".parse::<PrivacyLevel>().is_err());
    }

    #[test]
    fn test_privacy_level_serde_names() {
        let json = serde_json::to_string(&PrivacyLevel::CountsOnly).unwrap();
        assert_eq!(json, "\"counts_only\"");
    }

    #[test]
    fn test_private_is_not_listed() {
        assert!(PrivacyLevel::Public.is_listed());
        assert!(PrivacyLevel::CountsOnly.is_listed());
        assert!(!PrivacyLevel::Private.is_listed());
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(
            normalize_email("  Jane.Doe@Example.ORG ").unwrap(),
            "jane.doe@example.org"
        );
        assert!(normalize_email("not-an-email").is_err());
        assert!(normalize_email("a@b").is_err());
        assert!(normalize_email("").is_err());
    }

    #[test]
    fn test_default_display_name() {
        assert_eq!(default_display_name("jane.doe@example.org"), "Jane.Doe");
        assert_eq!(default_display_name("rv_birder42@x.com"), "Rv_Birder42");
    }

    #[test]
    fn test_new_user_defaults() {
        let now = Utc::now();
        let user = User::new(1, "kim@example.com".to_string(), now);
        assert_eq!(user.name, "Kim");
        assert_eq!(user.privacy_level, PrivacyLevel::Public);
        assert!(user.last_login.is_none());
    }
}
