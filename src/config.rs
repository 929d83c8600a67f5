//! Configuration management and validation.
//!
//! Provides configuration structures for the competition calendar,
//! authentication windows, the HTTP server and snapshot storage, loaded in
//! layers: defaults, an optional TOML file, then environment overrides.

use crate::constants::{
    APP_DIR_NAME, DEFAULT_BIND_ADDRESS, DEFAULT_COMPETITION_YEAR, DEFAULT_FRONTEND_URL,
    DEFAULT_LEADERBOARD_LIMIT, DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_OBSERVATIONS_LIMIT,
    MAGIC_LINK_TTL_MINUTES, MAX_LEADERBOARD_LIMIT, MAX_OBSERVATIONS_LIMIT, SESSION_TTL_DAYS,
    SUPPORTED_YEARS,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Competition calendar and paging limits
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CompetitionConfig {
    /// Year uploads are imported into
    pub year: i32,

    /// Years that may be queried
    pub supported_years: Vec<i32>,

    /// Leaderboard page size when none is requested
    pub leaderboard_default_limit: usize,

    /// Upper bound on requested leaderboard page size
    pub leaderboard_max_limit: usize,

    /// Observation list page size when none is requested
    pub observations_default_limit: usize,

    /// Upper bound on requested observation page size
    pub observations_max_limit: usize,
}

impl Default for CompetitionConfig {
    fn default() -> Self {
        Self {
            year: DEFAULT_COMPETITION_YEAR,
            supported_years: SUPPORTED_YEARS.to_vec(),
            leaderboard_default_limit: DEFAULT_LEADERBOARD_LIMIT,
            leaderboard_max_limit: MAX_LEADERBOARD_LIMIT,
            observations_default_limit: DEFAULT_OBSERVATIONS_LIMIT,
            observations_max_limit: MAX_OBSERVATIONS_LIMIT,
        }
    }
}

impl CompetitionConfig {
    /// Resolve an optional requested year, rejecting unsupported ones
    pub fn resolve_year(&self, requested: Option<i32>) -> Result<i32> {
        let year = requested.unwrap_or(self.year);
        if self.supported_years.contains(&year) {
            Ok(year)
        } else {
            Err(Error::validation(format!(
                "Unsupported competition year {}: expected one of {:?}",
                year, self.supported_years
            )))
        }
    }

    /// Resolve a leaderboard page size
    pub fn leaderboard_limit(&self, requested: Option<usize>) -> Result<usize> {
        resolve_limit(
            requested,
            self.leaderboard_default_limit,
            self.leaderboard_max_limit,
        )
    }

    /// Resolve an observation list page size
    pub fn observations_limit(&self, requested: Option<usize>) -> Result<usize> {
        resolve_limit(
            requested,
            self.observations_default_limit,
            self.observations_max_limit,
        )
    }
}

fn resolve_limit(requested: Option<usize>, default: usize, max: usize) -> Result<usize> {
    match requested {
        None => Ok(default),
        Some(0) => Err(Error::validation("limit must be at least 1")),
        Some(limit) if limit > max => Err(Error::validation(format!(
            "limit {} exceeds maximum of {}",
            limit, max
        ))),
        Some(limit) => Ok(limit),
    }
}

/// Magic-link and session settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AuthConfig {
    /// Magic-link validity window in minutes
    pub magic_link_ttl_minutes: i64,

    /// Session credential lifetime in days
    pub session_ttl_days: i64,

    /// Base URL the verify link points at
    pub frontend_url: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            magic_link_ttl_minutes: MAGIC_LINK_TTL_MINUTES,
            session_ttl_days: SESSION_TTL_DAYS,
            frontend_url: DEFAULT_FRONTEND_URL.to_string(),
        }
    }
}

impl AuthConfig {
    /// Magic-link validity as a chrono duration
    pub fn magic_link_ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.magic_link_ttl_minutes)
    }

    /// Session lifetime as a chrono duration
    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::days(self.session_ttl_days)
    }
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on
    pub bind_address: String,

    /// Largest accepted CSV upload in bytes
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

/// Snapshot storage settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding Parquet snapshots; in-memory only when absent
    pub data_dir: Option<PathBuf>,
}

/// Global configuration for the Big Year engine
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub competition: CompetitionConfig,
    pub auth: AuthConfig,
    pub server: ServerConfig,
    pub storage: StorageConfig,
}

impl Config {
    /// Load configuration using the layered approach (defaults -> file -> env)
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let mut config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(
                format!("Failed to read config file {}", path.display()),
                e,
            )
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| Error::configuration(format!("Invalid configuration file: {}", e)))
    }

    /// Apply environment overrides using the given lookup
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(year) = lookup("BIGYEAR_YEAR") {
            self.competition.year = year.trim().parse().map_err(|_| {
                Error::configuration(format!("BIGYEAR_YEAR is not a year: '{}'", year))
            })?;
            debug!("Competition year overridden from environment: {}", self.competition.year);
        }

        if let Some(bind) = lookup("BIGYEAR_BIND") {
            self.server.bind_address = bind;
        } else if let Some(port) = lookup("PORT") {
            let port: u16 = port
                .trim()
                .parse()
                .map_err(|_| Error::configuration(format!("PORT is not a port: '{}'", port)))?;
            self.server.bind_address = format!("0.0.0.0:{}", port);
        }

        if let Some(dir) = lookup("BIGYEAR_DATA_DIR") {
            self.storage.data_dir = Some(PathBuf::from(dir));
        }

        if let Some(url) = lookup("BIGYEAR_FRONTEND_URL") {
            self.auth.frontend_url = url;
        }

        Ok(())
    }

    /// Validate the configuration for consistency
    pub fn validate(&self) -> Result<()> {
        let competition = &self.competition;
        if !competition.supported_years.contains(&competition.year) {
            return Err(Error::configuration(format!(
                "Competition year {} is not in supported years {:?}",
                competition.year, competition.supported_years
            )));
        }

        if competition.leaderboard_default_limit == 0
            || competition.leaderboard_default_limit > competition.leaderboard_max_limit
        {
            return Err(Error::configuration(
                "Leaderboard default limit must be between 1 and the maximum limit",
            ));
        }

        if competition.observations_default_limit == 0
            || competition.observations_default_limit > competition.observations_max_limit
        {
            return Err(Error::configuration(
                "Observation default limit must be between 1 and the maximum limit",
            ));
        }

        if self.auth.magic_link_ttl_minutes <= 0 || self.auth.session_ttl_days <= 0 {
            return Err(Error::configuration("Token lifetimes must be positive"));
        }

        if self.server.max_upload_bytes == 0 {
            return Err(Error::configuration("Maximum upload size must be positive"));
        }

        Ok(())
    }

    /// Default data directory under the platform data dir
    pub fn default_data_dir() -> Result<PathBuf> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or_else(|| Error::configuration("Could not determine user data directory"))
    }

    /// Configuration with an explicit data directory
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.storage.data_dir = Some(data_dir.into());
        self
    }

    /// Configuration with a different competition year
    pub fn with_year(mut self, year: i32) -> Self {
        self.competition.year = year;
        self
    }
}
