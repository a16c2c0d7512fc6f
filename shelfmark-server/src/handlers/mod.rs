//! Request handlers

mod books;
mod sessions;

pub use books::*;
pub use sessions::*;

use crate::state::{AppState, SharedSession};
use axum::{http::StatusCode, Json};
use serde::Serialize;
use uuid::Uuid;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Handler error: status plus a plain-text message
pub type ApiError = (StatusCode, String);

/// Resolve a session id or answer 404
pub(crate) async fn load_session(state: &AppState, id: Uuid) -> Result<SharedSession, ApiError> {
    state
        .session(id)
        .await
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("Session {} not found", id)))
}
