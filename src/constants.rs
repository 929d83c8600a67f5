//! Application constants for the Big Year engine
//!
//! This module contains the eBird export schema, competition defaults,
//! taxonomy markers and user-facing messages used throughout the crate.

// =============================================================================
// eBird Export Columns ("MyEBirdData.csv")
// =============================================================================

/// Column names of the standard eBird personal data export
pub mod columns {
    pub const SUBMISSION_ID: &str = "Submission ID";
    pub const COMMON_NAME: &str = "Common Name";
    pub const SCIENTIFIC_NAME: &str = "Scientific Name";
    pub const TAXONOMIC_ORDER: &str = "Taxonomic Order";
    pub const COUNT: &str = "Count";
    pub const STATE_PROVINCE: &str = "State/Province";
    pub const COUNTY: &str = "County";
    pub const LOCATION_ID: &str = "Location ID";
    pub const LOCATION: &str = "Location";
    pub const LATITUDE: &str = "Latitude";
    pub const LONGITUDE: &str = "Longitude";
    pub const DATE: &str = "Date";

    /// Taxonomic category column; present in some export variants
    pub const CATEGORY_ALIASES: &[&str] = &["Category", "Taxonomic Category"];

    /// Columns that must be present in the header row
    pub const REQUIRED: &[&str] = &[SUBMISSION_ID, COMMON_NAME, SCIENTIFIC_NAME, DATE];
}

/// Accepted observation date formats, tried in order
pub const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];

// =============================================================================
// Competition Defaults
// =============================================================================

/// Default competition year
pub const DEFAULT_COMPETITION_YEAR: i32 = 2026;

/// Years the competition supports
pub const SUPPORTED_YEARS: &[i32] = &[2026, 2027];

/// Leaderboard page size when the caller gives none
pub const DEFAULT_LEADERBOARD_LIMIT: usize = 100;

/// Hard cap on leaderboard page size
pub const MAX_LEADERBOARD_LIMIT: usize = 500;

/// Observation list page size when the caller gives none
pub const DEFAULT_OBSERVATIONS_LIMIT: usize = 100;

/// Hard cap on observation list page size
pub const MAX_OBSERVATIONS_LIMIT: usize = 1000;

/// Maximum accepted upload size (10 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Default HTTP bind address
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8000";

// =============================================================================
// Authentication
// =============================================================================

/// Magic-link validity window
pub const MAGIC_LINK_TTL_MINUTES: i64 = 15;

/// Session credential lifetime
pub const SESSION_TTL_DAYS: i64 = 30;

/// Random bytes per token (hex-encoded on the wire)
pub const TOKEN_BYTES: usize = 32;

/// Where magic links point by default
pub const DEFAULT_FRONTEND_URL: &str = "http://localhost:5173";

/// Session token type reported to clients
pub const TOKEN_TYPE: &str = "bearer";

// =============================================================================
// Taxonomy
// =============================================================================

/// Common-name fragments marking forms that never count toward a species total.
/// Matched case-insensitively.
pub mod taxonomy_markers {
    pub const DOMESTIC: &[&str] = &["domestic"];
    pub const HYBRID: &[&str] = &["hybrid", " x "];
    pub const INTERGRADE: &[&str] = &["intergrade"];
    pub const SLASH: &[&str] = &["/"];
    pub const SPUH: &[&str] = &[" sp.", "sp. "];
}

// =============================================================================
// Snapshot Files
// =============================================================================

/// Users snapshot file name within the data directory
pub const USERS_SNAPSHOT_FILE: &str = "users.parquet";

/// Observations snapshot file name within the data directory
pub const OBSERVATIONS_SNAPSHOT_FILE: &str = "observations.parquet";

/// Application directory name under the platform data directory
pub const APP_DIR_NAME: &str = "bigyear";

// =============================================================================
// Messages
// =============================================================================

pub mod messages {
    pub const COUNTS_ONLY: &str =
        "This birder shares species counts only; sighting locations are hidden.";
    pub const PRIVATE: &str = "This birder's species list is private.";
    pub const MAGIC_LINK_SENT: &str = "Magic link sent to email";
    pub const UPLOAD_OK: &str = "CSV processed successfully";
    pub const LOGGED_OUT: &str = "Logged out successfully";
}
