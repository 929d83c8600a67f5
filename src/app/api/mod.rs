//! Application service facade
//!
//! - [`service`] - `BigYearService`, one method per client operation
//! - [`responses`] - Request and response bodies

pub mod responses;
pub mod service;

#[cfg(test)]
pub mod tests;

pub use responses::{
    GeographicStatsResponse, HealthResponse, MagicLinkRequest, MagicLinkResponse,
    MessageResponse, ObservationListResponse, ObservationQuery, ObservationResponse,
    ProfileResponse, ProfileStats, ProfileUpdateRequest, TokenResponse, UploadResponse,
    UserResponse,
};
pub use service::BigYearService;
