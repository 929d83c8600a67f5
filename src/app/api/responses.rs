//! Request and response bodies exchanged with clients

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::app::models::{Observation, PrivacyLevel, User, UserId};
use crate::app::services::importer::ImportStats;
use crate::app::services::species_aggregator::StateStats;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MagicLinkRequest {
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MagicLinkResponse {
    pub message: String,
    /// Seconds until the link stops working
    pub expires_in: i64,
}

/// Public part of a user record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub privacy_level: PrivacyLevel,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            privacy_level: user.privacy_level,
            created_at: user.created_at,
            last_login: user.last_login,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub user: UserResponse,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub message: String,
    pub stats: ImportStats,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileStats {
    pub species_count: usize,
    pub total_observations: usize,
    pub states_visited: usize,
    pub last_upload: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub stats: ProfileStats,
}

/// Profile changes; privacy level arrives as its wire string
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdateRequest {
    pub name: Option<String>,
    pub privacy_level: Option<String>,
}

/// Paging and filtering for the caller's observation list
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ObservationQuery {
    pub year: Option<i32>,
    pub state: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationResponse {
    pub id: u64,
    pub submission_id: Option<String>,
    pub common_name: String,
    pub scientific_name: String,
    pub count: Option<String>,
    pub state_province: Option<String>,
    pub county: Option<String>,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub observation_date: NaiveDate,
}

impl From<&Observation> for ObservationResponse {
    fn from(observation: &Observation) -> Self {
        Self {
            id: observation.sequence,
            submission_id: observation.submission_id.clone(),
            common_name: observation.common_name.clone(),
            scientific_name: observation.scientific_name.clone(),
            count: observation.count.clone(),
            state_province: observation.state_province.clone(),
            county: observation.county.clone(),
            location: observation.location.clone(),
            latitude: observation.latitude,
            longitude: observation.longitude,
            observation_date: observation.observation_date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationListResponse {
    pub observations: Vec<ObservationResponse>,
    /// Matching observations before paging
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeographicStatsResponse {
    pub year: i32,
    pub states_visited: Vec<StateStats>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub users: usize,
    pub observations: usize,
}
