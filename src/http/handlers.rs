//! Route handlers
//!
//! Each handler unpacks the request, calls one `BigYearService` operation and
//! returns its body as JSON.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Multipart, Path, Query, State};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::debug;

use super::error::ApiError;
use super::extract::AuthUser;
use crate::app::api::{
    BigYearService, GeographicStatsResponse, HealthResponse, MagicLinkRequest,
    MagicLinkResponse, MessageResponse, ObservationListResponse, ObservationQuery,
    ProfileResponse, ProfileUpdateRequest, TokenResponse, UploadResponse,
};
use crate::app::models::UserId;
use crate::app::services::leaderboard::{LeaderboardView, ProgressView, SpeciesListView};
use crate::Error;

type AppState = State<Arc<BigYearService>>;
type ApiResult<T> = std::result::Result<Json<T>, ApiError>;

/// Multipart field carrying the export
const UPLOAD_FIELD: &str = "file";

#[derive(Debug, Deserialize)]
pub struct VerifyParams {
    pub token: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct LeaderboardParams {
    pub year: Option<i32>,
    pub limit: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SpeciesParams {
    pub year: Option<i32>,
    pub sort: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct YearParams {
    pub year: Option<i32>,
}

pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "Big Year leaderboard API",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn health(State(service): AppState) -> Json<HealthResponse> {
    Json(service.health().await)
}

pub async fn request_magic_link(
    State(service): AppState,
    body: Result<Json<MagicLinkRequest>, JsonRejection>,
) -> ApiResult<MagicLinkResponse> {
    let Json(request) = body?;
    Ok(Json(service.request_magic_link(&request.email).await?))
}

pub async fn verify(
    State(service): AppState,
    params: Result<Query<VerifyParams>, QueryRejection>,
) -> ApiResult<TokenResponse> {
    let Query(params) = params?;
    Ok(Json(service.verify_magic_link(&params.token).await?))
}

pub async fn logout(State(service): AppState, auth: AuthUser) -> ApiResult<MessageResponse> {
    Ok(Json(service.logout(&auth.token).await?))
}

pub async fn upload_csv(
    State(service): AppState,
    auth: AuthUser,
    mut multipart: Multipart,
) -> ApiResult<UploadResponse> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let file_name = field.file_name().map(str::to_string);
        let content = field.bytes().await?;
        debug!(
            "Upload of {} bytes from user {} ({:?})",
            content.len(),
            auth.user.id,
            file_name
        );
        let response = service
            .upload_csv(auth.user.id, file_name.as_deref(), &content)
            .await?;
        return Ok(Json(response));
    }

    Err(Error::validation(format!("Missing multipart field '{}'", UPLOAD_FIELD)).into())
}

pub async fn leaderboard(
    State(service): AppState,
    params: Result<Query<LeaderboardParams>, QueryRejection>,
) -> ApiResult<LeaderboardView> {
    let Query(params) = params?;
    Ok(Json(service.leaderboard(params.year, params.limit).await?))
}

pub async fn species_list(
    State(service): AppState,
    user_id: Result<Path<UserId>, PathRejection>,
    params: Result<Query<SpeciesParams>, QueryRejection>,
) -> ApiResult<SpeciesListView> {
    let Path(user_id) = user_id?;
    let Query(params) = params?;
    Ok(Json(
        service
            .species_list(user_id, params.year, params.sort.as_deref())
            .await?,
    ))
}

pub async fn progress(
    State(service): AppState,
    user_id: Result<Path<UserId>, PathRejection>,
    params: Result<Query<YearParams>, QueryRejection>,
) -> ApiResult<ProgressView> {
    let Path(user_id) = user_id?;
    let Query(params) = params?;
    Ok(Json(service.progress(user_id, params.year).await?))
}

pub async fn profile(State(service): AppState, auth: AuthUser) -> ApiResult<ProfileResponse> {
    Ok(Json(service.profile(auth.user.id).await?))
}

pub async fn update_profile(
    State(service): AppState,
    auth: AuthUser,
    body: Result<Json<ProfileUpdateRequest>, JsonRejection>,
) -> ApiResult<ProfileResponse> {
    let Json(request) = body?;
    Ok(Json(service.update_profile(auth.user.id, request).await?))
}

pub async fn observations(
    State(service): AppState,
    auth: AuthUser,
    params: Result<Query<ObservationQuery>, QueryRejection>,
) -> ApiResult<ObservationListResponse> {
    let Query(query) = params?;
    Ok(Json(service.observations(auth.user.id, query).await?))
}

pub async fn geographic_stats(
    State(service): AppState,
    auth: AuthUser,
    params: Result<Query<YearParams>, QueryRejection>,
) -> ApiResult<GeographicStatsResponse> {
    let Query(params) = params?;
    Ok(Json(
        service.geographic_stats(auth.user.id, params.year).await?,
    ))
}
