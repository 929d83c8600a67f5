//! Tests for the HTTP boundary helpers

use axum::body::to_bytes;
use axum::response::Response;
use serde_json::Value;

// Test modules
mod error_tests;

/// Decode a JSON response body
pub async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
