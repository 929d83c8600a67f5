//! Operations behind every client-facing endpoint
//!
//! `BigYearService` owns the store, the importer and the auth state. The HTTP
//! handlers and the CLI both go through it, so validation, privacy filtering
//! and snapshot writes happen in one place.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::responses::{
    GeographicStatsResponse, HealthResponse, MagicLinkResponse, MessageResponse,
    ObservationListResponse, ObservationQuery, ObservationResponse, ProfileResponse,
    ProfileStats, ProfileUpdateRequest, TokenResponse, UploadResponse, UserResponse,
};
use crate::app::models::{PrivacyLevel, User, UserId, normalize_email};
use crate::app::services::auth::{
    LinkMailer, LogMailer, MagicLinkIssuer, SessionStore, verification_url,
};
use crate::app::services::importer::{ImportProcessor, ImportStats};
use crate::app::services::leaderboard::{
    LeaderboardView, ProgressView, SpeciesListView, compute_standings, leaderboard_view,
    progress_view, species_list_view,
};
use crate::app::services::observation_store::{ObservationStore, ProfileUpdate};
use crate::app::services::species_aggregator::{
    SpeciesSort, geographic_stats, monthly_progress, summarize_year,
};
use crate::config::Config;
use crate::constants::{TOKEN_TYPE, messages};
use crate::{Error, Result};

/// Big Year application service
#[derive(Debug)]
pub struct BigYearService {
    config: Config,
    store: Arc<ObservationStore>,
    importer: ImportProcessor,
    magic_links: MagicLinkIssuer,
    sessions: SessionStore,
    mailer: Arc<dyn LinkMailer>,
    /// Serializes snapshot writes so an older state never lands last
    persist_lock: Mutex<()>,
}

impl BigYearService {
    pub fn new(config: Config, store: ObservationStore, mailer: Arc<dyn LinkMailer>) -> Self {
        let store = Arc::new(store);
        let importer = ImportProcessor::new(
            Arc::clone(&store),
            config.competition.year,
            config.server.max_upload_bytes,
        );
        Self {
            magic_links: MagicLinkIssuer::new(config.auth.magic_link_ttl()),
            sessions: SessionStore::new(config.auth.session_ttl()),
            config,
            store,
            importer,
            mailer,
            persist_lock: Mutex::new(()),
        }
    }

    /// Build the service, restoring the snapshot when a data directory is configured
    pub fn open(config: Config) -> Result<Self> {
        let store = match &config.storage.data_dir {
            Some(dir) => ObservationStore::open(dir)?,
            None => ObservationStore::new(),
        };
        info!(
            "Service ready for competition year {}",
            config.competition.year
        );
        Ok(Self::new(config, store, Arc::new(LogMailer)))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &Arc<ObservationStore> {
        &self.store
    }

    pub fn data_dir(&self) -> Option<&Path> {
        self.config.storage.data_dir.as_deref()
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Issue a magic link and hand it to the mailer
    ///
    /// Succeeds for any well-formed email, registered or not.
    pub async fn request_magic_link(&self, email: &str) -> Result<MagicLinkResponse> {
        let email = normalize_email(email)?;
        let link = self.magic_links.issue(&email).await;
        let url = verification_url(&self.config.auth.frontend_url, &link.token);

        if let Err(e) = self.mailer.send_magic_link(&email, &url) {
            warn!("Magic link delivery to {} failed: {}", email, e);
        }

        Ok(MagicLinkResponse {
            message: messages::MAGIC_LINK_SENT.to_string(),
            expires_in: self.magic_links.ttl().num_seconds(),
        })
    }

    /// Redeem a magic link, creating the user on first login
    pub async fn verify_magic_link(&self, token: &str) -> Result<TokenResponse> {
        let email = self.magic_links.redeem(token).await?;
        let now = Utc::now();

        let (user, created) = self.store.find_or_create_user(&email, now).await;
        let user = self.store.record_login(user.id, now).await?;
        let session = self.sessions.create(user.id).await;
        if created {
            info!("New participant {} registered", user.id);
        }
        self.persist().await;

        Ok(TokenResponse {
            access_token: session.token,
            token_type: TOKEN_TYPE.to_string(),
            user: UserResponse::from(&user),
        })
    }

    /// Resolve a bearer credential to its user
    pub async fn authenticate(&self, token: &str) -> Result<User> {
        let user_id = self.sessions.resolve(token).await?;
        self.store
            .user(user_id)
            .await
            .ok_or_else(|| Error::unauthorized("Session user no longer exists"))
    }

    pub async fn logout(&self, token: &str) -> Result<MessageResponse> {
        if self.sessions.revoke(token).await {
            debug!("Session revoked");
        }
        Ok(MessageResponse::new(messages::LOGGED_OUT))
    }

    // =========================================================================
    // Uploads
    // =========================================================================

    /// Import an uploaded eBird export for the caller
    pub async fn upload_csv(
        &self,
        user_id: UserId,
        file_name: Option<&str>,
        content: &[u8],
    ) -> Result<UploadResponse> {
        let stats = self.importer.import_bytes(user_id, file_name, content).await?;
        if stats.imported > 0 {
            self.persist().await;
        }
        Ok(UploadResponse {
            message: messages::UPLOAD_OK.to_string(),
            stats,
        })
    }

    /// Find or register a participant by email without a login
    pub async fn ensure_user(&self, email: &str) -> Result<User> {
        let email = normalize_email(email)?;
        let (user, created) = self.store.find_or_create_user(&email, Utc::now()).await;
        if created {
            self.persist().await;
        }
        Ok(user)
    }

    /// Import an export file from disk for a user
    pub async fn import_file(&self, user_id: UserId, path: &Path) -> Result<ImportStats> {
        let stats = self.importer.import_file(user_id, path).await?;
        if stats.imported > 0 {
            self.persist().await;
        }
        Ok(stats)
    }

    // =========================================================================
    // Leaderboard
    // =========================================================================

    pub async fn leaderboard(
        &self,
        year: Option<i32>,
        limit: Option<usize>,
    ) -> Result<LeaderboardView> {
        let year = self.config.competition.resolve_year(year)?;
        let limit = self.config.competition.leaderboard_limit(limit)?;

        let standings = self
            .store
            .read(|view| compute_standings(view, year))
            .await
            .truncate(limit);
        Ok(leaderboard_view(year, &standings))
    }

    /// Privacy-filtered species list for any participant
    pub async fn species_list(
        &self,
        user_id: UserId,
        year: Option<i32>,
        sort: Option<&str>,
    ) -> Result<SpeciesListView> {
        let year = self.config.competition.resolve_year(year)?;
        let sort = match sort {
            Some(sort) => sort.parse::<SpeciesSort>()?,
            None => SpeciesSort::default(),
        };

        self.store
            .read(|view| {
                let owner = view
                    .user(user_id)
                    .ok_or_else(|| Error::not_found("User", user_id))?;
                let summary = summarize_year(user_id, year, view.observations_for(user_id));
                Ok(species_list_view(owner, summary, sort))
            })
            .await
    }

    /// Privacy-filtered monthly progress for any participant
    pub async fn progress(&self, user_id: UserId, year: Option<i32>) -> Result<ProgressView> {
        let year = self.config.competition.resolve_year(year)?;
        self.store
            .read(|view| {
                let owner = view
                    .user(user_id)
                    .ok_or_else(|| Error::not_found("User", user_id))?;
                if owner.privacy_level == PrivacyLevel::Private {
                    return Ok(progress_view(owner, year, Vec::new()));
                }
                let months = monthly_progress(year, view.observations_for(user_id));
                Ok(progress_view(owner, year, months))
            })
            .await
    }

    // =========================================================================
    // Caller's own data
    // =========================================================================

    pub async fn profile(&self, user_id: UserId) -> Result<ProfileResponse> {
        let year = self.config.competition.year;
        self.store
            .read(|view| {
                let user = view
                    .user(user_id)
                    .ok_or_else(|| Error::not_found("User", user_id))?;
                let observations = view.observations_for(user_id);
                let summary = summarize_year(user_id, year, observations);
                let states_visited = observations
                    .iter()
                    .filter(|o| o.in_year(year))
                    .filter_map(|o| o.state_province.as_deref())
                    .collect::<HashSet<_>>()
                    .len();

                Ok(ProfileResponse {
                    user: UserResponse::from(user),
                    stats: ProfileStats {
                        species_count: summary.species_count(),
                        total_observations: summary.observation_count,
                        states_visited,
                        last_upload: view.last_upload(user_id),
                    },
                })
            })
            .await
    }

    /// Change display name and/or privacy level
    pub async fn update_profile(
        &self,
        user_id: UserId,
        request: ProfileUpdateRequest,
    ) -> Result<ProfileResponse> {
        let name = match request.name {
            Some(name) => {
                let trimmed = name.trim();
                if trimmed.is_empty() {
                    return Err(Error::validation("Name must not be empty"));
                }
                Some(trimmed.to_string())
            }
            None => None,
        };
        let privacy_level = request
            .privacy_level
            .as_deref()
            .map(str::parse::<PrivacyLevel>)
            .transpose()?;

        self.store
            .update_profile(
                user_id,
                ProfileUpdate {
                    name,
                    privacy_level,
                },
            )
            .await?;
        self.persist().await;
        self.profile(user_id).await
    }

    /// The caller's observations for a year, newest first
    pub async fn observations(
        &self,
        user_id: UserId,
        query: ObservationQuery,
    ) -> Result<ObservationListResponse> {
        let year = self.config.competition.resolve_year(query.year)?;
        let limit = self.config.competition.observations_limit(query.limit)?;
        let offset = query.offset.unwrap_or(0);
        let state = query.state.filter(|s| !s.trim().is_empty());

        Ok(self
            .store
            .read(|view| {
                let mut matching: Vec<_> = view
                    .observations_for(user_id)
                    .iter()
                    .filter(|o| o.in_year(year))
                    .filter(|o| match &state {
                        Some(state) => o.state_province.as_deref() == Some(state.as_str()),
                        None => true,
                    })
                    .collect();
                matching.sort_by(|a, b| {
                    b.observation_date
                        .cmp(&a.observation_date)
                        .then(b.sequence.cmp(&a.sequence))
                });

                ObservationListResponse {
                    total: matching.len(),
                    observations: matching
                        .into_iter()
                        .skip(offset)
                        .take(limit)
                        .map(ObservationResponse::from)
                        .collect(),
                }
            })
            .await)
    }

    pub async fn geographic_stats(
        &self,
        user_id: UserId,
        year: Option<i32>,
    ) -> Result<GeographicStatsResponse> {
        let year = self.config.competition.resolve_year(year)?;
        let states_visited = self
            .store
            .read(|view| geographic_stats(year, view.observations_for(user_id)))
            .await;
        Ok(GeographicStatsResponse {
            year,
            states_visited,
        })
    }

    pub async fn health(&self) -> HealthResponse {
        let (users, observations) = self
            .store
            .read(|view| (view.user_count(), view.observation_count()))
            .await;
        HealthResponse {
            status: "healthy".to_string(),
            users,
            observations,
        }
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Write a snapshot when a data directory is configured
    ///
    /// Failures are logged; the change that triggered the write stays committed.
    pub async fn persist(&self) {
        let Some(dir) = self.config.storage.data_dir.clone() else {
            return;
        };
        if let Err(e) = self.save_snapshot(&dir).await {
            warn!("Snapshot write to {} failed: {}", dir.display(), e);
        }
    }

    /// Write a snapshot and report the outcome
    pub async fn save_snapshot(&self, dir: &Path) -> Result<()> {
        let _guard = self.persist_lock.lock().await;
        self.store.save(dir).await
    }
}
