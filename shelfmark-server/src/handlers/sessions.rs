//! Session lifecycle handlers

use super::{load_session, ApiError};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use shelfmark_core::{BookQuery, CanonicalBook};
use uuid::Uuid;

/// Response to opening a session
#[derive(Debug, Serialize)]
pub struct SessionCreated {
    pub id: Uuid,
}

/// Snapshot of a session's state
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub pending: usize,
    pub processed: Vec<CanonicalBook>,
    pub unprocessed: Vec<BookQuery>,
}

/// Open a new session
pub async fn create_session(State(state): State<AppState>) -> (StatusCode, Json<SessionCreated>) {
    let (id, _) = state.create_session().await;
    (StatusCode::CREATED, Json(SessionCreated { id }))
}

/// Get a session's pending count and finalized results
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session = load_session(&state, id).await?;
    let session = session.lock().await;

    Ok(Json(SessionResponse {
        id,
        created_at: session.created_at(),
        pending: session.queue().len(),
        processed: session.processed().to_vec(),
        unprocessed: session.unprocessed().to_vec(),
    }))
}

/// Close a session and drop everything in it
pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> StatusCode {
    if state.remove_session(id).await {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}
