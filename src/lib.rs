//! Big Year Leaderboard Library
//!
//! A Rust library for running a calendar-year birding competition from
//! periodic eBird "MyEBirdData.csv" exports.
//!
//! This library provides tools for:
//! - Parsing eBird export rows into candidate observations with per-row rejection reasons
//! - Idempotent re-imports through natural-key deduplication under a per-user import lock
//! - Per-user, per-year species aggregation with first-sighting metadata
//! - Competition-ranked leaderboards with deterministic tie-breaks
//! - Privacy-aware response views (`public`, `counts_only`, `private`)
//! - Magic-link login and bearer sessions
//! - Parquet snapshots of the observation store

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod api;
    pub mod models;
    pub mod services {
        pub mod auth;
        pub mod ebird_csv_parser;
        pub mod importer;
        pub mod leaderboard;
        pub mod observation_store;
        pub mod species_aggregator;
    }
}

// HTTP boundary
pub mod http;

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::api::BigYearService;
pub use app::models::{Observation, PrivacyLevel, User, UserId};
pub use config::Config;

/// Result type alias for the Big Year engine
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse error classification used at the request boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller sent something malformed; nothing was mutated
    Validation,
    /// Token or session credential was rejected
    Auth,
    /// Referenced entity does not exist
    NotFound,
    /// Upload exceeded the configured size limit
    PayloadTooLarge,
    /// Server-side failure
    Internal,
}

impl ErrorKind {
    /// Stable machine-readable code for responses
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::Auth => "auth",
            ErrorKind::NotFound => "not_found",
            ErrorKind::PayloadTooLarge => "payload_too_large",
            ErrorKind::Internal => "internal",
        }
    }
}

/// Comprehensive error types for Big Year operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV could not be read at all
    #[error("CSV parsing error: {message}")]
    CsvParsing {
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// Request or file content failed validation
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Magic-link token unknown, already used, or expired
    #[error("Invalid or expired magic link token")]
    InvalidOrExpiredToken,

    /// Missing, unknown or expired session credential
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Upload exceeds the configured limit
    #[error("Payload too large: {size} bytes exceeds limit of {limit} bytes")]
    PayloadTooLarge { size: usize, limit: usize },

    /// Snapshot storage error
    #[error("Storage error: {message}")]
    Storage {
        message: String,
        #[source]
        source: polars::error::PolarsError,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV parsing error with context
    pub fn csv_parsing(message: impl Into<String>, source: Option<csv::Error>) -> Self {
        Self::CsvParsing {
            message: message.into(),
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create an unauthorized error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl std::fmt::Display) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Create a payload too large error
    pub fn payload_too_large(size: usize, limit: usize) -> Self {
        Self::PayloadTooLarge { size, limit }
    }

    /// Create a storage error
    pub fn storage(message: impl Into<String>, source: polars::error::PolarsError) -> Self {
        Self::Storage {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }

    /// Classify this error for the request boundary
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation { .. } | Error::CsvParsing { .. } => ErrorKind::Validation,
            Error::InvalidOrExpiredToken | Error::Unauthorized { .. } => ErrorKind::Auth,
            Error::NotFound { .. } => ErrorKind::NotFound,
            Error::PayloadTooLarge { .. } => ErrorKind::PayloadTooLarge,
            Error::Io { .. }
            | Error::Storage { .. }
            | Error::Configuration { .. }
            | Error::ProcessingInterrupted { .. } => ErrorKind::Internal,
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvParsing {
            message: "CSV parsing failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<polars::error::PolarsError> for Error {
    fn from(error: polars::error::PolarsError) -> Self {
        Self::Storage {
            message: "Snapshot operation failed".to_string(),
            source: error,
        }
    }
}
