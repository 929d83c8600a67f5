//! Tests for bearer sessions

use super::*;
use crate::Error;
use crate::app::services::auth::SessionStore;
use chrono::Duration;

#[tokio::test]
async fn test_session_resolves_until_expiry() {
    let sessions = SessionStore::new(Duration::days(30));
    let session = sessions.create_at(7, at(9, 0)).await;

    assert_eq!(sessions.resolve_at(&session.token, at(9, 1)).await.unwrap(), 7);

    let later = at(9, 0) + Duration::days(30);
    let expired = sessions.resolve_at(&session.token, later).await;
    assert!(matches!(expired, Err(Error::Unauthorized { .. })));
    // Expired sessions are dropped on first sight
    assert_eq!(sessions.active_sessions().await, 0);
}

#[tokio::test]
async fn test_revoked_session_is_rejected() {
    let sessions = SessionStore::new(Duration::days(30));
    let session = sessions.create_at(7, at(9, 0)).await;

    assert!(sessions.revoke(&session.token).await);
    assert!(!sessions.revoke(&session.token).await);
    assert!(sessions.resolve_at(&session.token, at(9, 1)).await.is_err());
}

#[tokio::test]
async fn test_sessions_are_independent() {
    let sessions = SessionStore::new(Duration::days(30));
    let a = sessions.create_at(1, at(9, 0)).await;
    let b = sessions.create_at(1, at(9, 0)).await;
    assert_ne!(a.token, b.token);

    sessions.revoke(&a.token).await;
    assert_eq!(sessions.resolve_at(&b.token, at(9, 5)).await.unwrap(), 1);
}

#[tokio::test]
async fn test_unknown_session() {
    let sessions = SessionStore::new(Duration::days(30));
    let err = sessions.resolve_at("nope", at(9, 0)).await.unwrap_err();
    assert_eq!(err.kind(), crate::ErrorKind::Auth);
}
