// Handlers module
// HTTP handlers for the REST API

pub mod diagnostics;
pub mod languages;

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use crate::error::ApiError;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Root greeting
/// GET /
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Hello from Axum Backend!",
    })
}

/// GET /api/hello
pub async fn hello() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Hello from the backend API!",
    })
}

/// Health check handler
/// Returns "OK" with 200 status for monitoring purposes
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Fallback for paths no route matches
pub async fn not_found() -> ApiError {
    ApiError::RouteNotFound
}
