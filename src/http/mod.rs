//! HTTP boundary
//!
//! Thin axum layer over [`BigYearService`]. Handlers never touch the store
//! directly; every error leaves through [`ApiError`] so clients always get
//! `{"error", "detail"}` with the matching status code.
//!
//! | route                                 | auth   |
//! |---------------------------------------|--------|
//! | `POST /auth/request-magic-link`       | none   |
//! | `GET  /auth/verify?token=`            | none   |
//! | `POST /auth/logout`                   | bearer |
//! | `POST /upload/csv`                    | bearer |
//! | `GET  /leaderboard`                   | none   |
//! | `GET  /leaderboard/:id/species`       | none   |
//! | `GET  /leaderboard/:id/progress`      | none   |
//! | `GET  /user/me`, `PATCH /user/me`     | bearer |
//! | `GET  /user/me/observations`          | bearer |
//! | `GET  /user/me/geographic-stats`      | bearer |

pub mod error;
pub mod extract;
pub mod handlers;

#[cfg(test)]
pub mod tests;

pub use error::{ApiError, status_for};
pub use extract::{AuthUser, bearer_token};

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::app::api::BigYearService;
use crate::{Error, Result};

/// Room for multipart framing around the largest accepted file
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Build the application router
pub fn router(service: Arc<BigYearService>) -> Router {
    let body_limit = service.config().server.max_upload_bytes + MULTIPART_OVERHEAD;

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/auth/request-magic-link", post(handlers::request_magic_link))
        .route("/auth/verify", get(handlers::verify))
        .route("/auth/logout", post(handlers::logout))
        .route("/upload/csv", post(handlers::upload_csv))
        .route("/leaderboard", get(handlers::leaderboard))
        .route("/leaderboard/:user_id/species", get(handlers::species_list))
        .route("/leaderboard/:user_id/progress", get(handlers::progress))
        .route(
            "/user/me",
            get(handlers::profile).patch(handlers::update_profile),
        )
        .route("/user/me/observations", get(handlers::observations))
        .route("/user/me/geographic-stats", get(handlers::geographic_stats))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

/// Serve until `shutdown` is cancelled
pub async fn serve(
    service: Arc<BigYearService>,
    bind_address: &str,
    shutdown: CancellationToken,
) -> Result<()> {
    let listener = TcpListener::bind(bind_address)
        .await
        .map_err(|e| Error::io(format!("Failed to bind {}", bind_address), e))?;
    let local_addr = listener
        .local_addr()
        .map_err(|e| Error::io("Failed to read listener address", e))?;
    info!("Listening on http://{}", local_addr);

    axum::serve(listener, router(service))
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| Error::io("HTTP server failed", e))?;

    info!("HTTP server stopped");
    Ok(())
}
