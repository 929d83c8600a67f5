//! Tests for error mapping and bearer parsing

use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::*;
use crate::http::{ApiError, bearer_token, status_for};
use crate::{Error, ErrorKind};

#[test]
fn test_status_mapping() {
    assert_eq!(status_for(ErrorKind::Validation), StatusCode::BAD_REQUEST);
    assert_eq!(status_for(ErrorKind::Auth), StatusCode::UNAUTHORIZED);
    assert_eq!(status_for(ErrorKind::NotFound), StatusCode::NOT_FOUND);
    assert_eq!(
        status_for(ErrorKind::PayloadTooLarge),
        StatusCode::PAYLOAD_TOO_LARGE
    );
    assert_eq!(
        status_for(ErrorKind::Internal),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[test]
fn test_bearer_token_parsing() {
    assert_eq!(bearer_token("Bearer abc123"), Some("abc123"));
    assert_eq!(bearer_token("bearer  abc123 "), Some("abc123"));
    assert_eq!(bearer_token("Basic abc123"), None);
    assert_eq!(bearer_token("Bearer "), None);
    assert_eq!(bearer_token("abc123"), None);
}

#[tokio::test]
async fn test_error_body_carries_kind_and_detail() {
    let response = ApiError::from(Error::not_found("User", 9)).into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["error"], "not_found");
    assert_eq!(body["detail"], "User not found: 9");
}

#[tokio::test]
async fn test_internal_detail_is_hidden() {
    let err = Error::io(
        "Failed to write /var/lib/bigyear/users.parquet",
        std::io::Error::other("disk full"),
    );
    let response = ApiError::from(err).into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(response).await;
    assert_eq!(body["error"], "internal");
    assert!(!body["detail"].as_str().unwrap().contains("parquet"));
}
