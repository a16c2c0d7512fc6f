//! Submission, reconciliation and export handlers

use super::{load_session, ApiError};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use shelfmark_core::{
    detection::parse_detection_payload,
    export::{Exporter, LibraryThingCsv},
    normalize, BookQuery, CanonicalBook, EntryId, FinalizeReport, PolicyKind, Selection,
    SelectionError,
};
use uuid::Uuid;

fn selection_error(e: SelectionError) -> ApiError {
    let status = match e {
        SelectionError::UnknownEntry(_) => StatusCode::NOT_FOUND,
        SelectionError::IndexOutOfRange { .. } => StatusCode::BAD_REQUEST,
    };
    (status, e.to_string())
}

/// Response to a single submission
#[derive(Debug, Serialize)]
pub struct BookAdded {
    pub entry_id: EntryId,
}

/// Submit one `{title, author}` query
pub async fn add_book(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(query): Json<BookQuery>,
) -> Result<(StatusCode, Json<BookAdded>), ApiError> {
    let session = load_session(&state, id).await?;
    let entry_id = session.lock().await.enqueue(query).ok_or((
        StatusCode::UNPROCESSABLE_ENTITY,
        "Title must not be empty".to_string(),
    ))?;

    Ok((StatusCode::CREATED, Json(BookAdded { entry_id })))
}

/// Response to a detector payload submission
#[derive(Debug, Serialize)]
pub struct DetectedAdded {
    /// Books the detector reported
    pub detected: usize,
    /// Entries created for the ones with a usable title
    pub admitted: Vec<EntryId>,
}

/// Submit a detector payload (`{"books": [...]}`) as raw text
pub async fn add_detected(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: String,
) -> Result<Json<DetectedAdded>, ApiError> {
    let session = load_session(&state, id).await?;
    let queries = parse_detection_payload(&body).map_err(|e| {
        tracing::warn!("Rejected detector payload: {}", e);
        (StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
    })?;

    let detected = queries.len();
    let mut session = session.lock().await;
    let admitted: Vec<EntryId> = queries
        .into_iter()
        .filter_map(|q| session.enqueue(q))
        .collect();

    Ok(Json(DetectedAdded { detected, admitted }))
}

/// One candidate as shown to the user
#[derive(Debug, Serialize)]
pub struct CandidateView {
    pub index: usize,
    pub label: String,
    pub preview: CanonicalBook,
}

/// One pending entry with its candidates
#[derive(Debug, Serialize)]
pub struct EntryView {
    pub id: EntryId,
    pub title: String,
    pub author: Option<String>,
    pub selection: Selection,
    pub candidates: Vec<CandidateView>,
}

/// List pending entries, fetching candidates for any not yet looked up
pub async fn list_pending(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<EntryView>>, ApiError> {
    let session = load_session(&state, id).await?;
    let mut session = session.lock().await;
    let queue = session.queue_mut();

    let mut entries = Vec::with_capacity(queue.len());
    for entry_id in queue.ids() {
        let candidates: Vec<CandidateView> = queue
            .candidates(entry_id, state.lookup.as_ref())
            .await
            .map_err(selection_error)?
            .iter()
            .enumerate()
            .map(|(index, record)| CandidateView {
                index,
                label: record.display_label(),
                preview: normalize(record),
            })
            .collect();

        let entry = queue
            .get(entry_id)
            .ok_or_else(|| selection_error(SelectionError::UnknownEntry(entry_id)))?;
        entries.push(EntryView {
            id: entry_id,
            title: entry.query().title.clone(),
            author: entry.query().author.clone(),
            selection: entry.selection(),
            candidates,
        });
    }

    Ok(Json(entries))
}

/// Body of a selection update; a null index clears the selection
#[derive(Debug, Deserialize)]
pub struct SelectRequest {
    pub index: Option<usize>,
}

/// Choose (or clear) the candidate for an entry
pub async fn select_candidate(
    State(state): State<AppState>,
    Path((id, entry_id)): Path<(Uuid, EntryId)>,
    Json(request): Json<SelectRequest>,
) -> Result<Json<Selection>, ApiError> {
    let session = load_session(&state, id).await?;
    let mut session = session.lock().await;
    let queue = session.queue_mut();

    let updated = match request.index {
        Some(index) => queue.select(entry_id, index),
        None => queue.clear_selection(entry_id),
    };
    updated.map_err(selection_error)?;

    let selection = queue
        .get(entry_id)
        .map(|e| e.selection())
        .unwrap_or_default();
    Ok(Json(selection))
}

/// Return an entry to the unselected state
pub async fn clear_selection(
    State(state): State<AppState>,
    Path((id, entry_id)): Path<(Uuid, EntryId)>,
) -> Result<StatusCode, ApiError> {
    let session = load_session(&state, id).await?;
    session
        .lock()
        .await
        .queue_mut()
        .clear_selection(entry_id)
        .map_err(selection_error)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Body of a finalize request
#[derive(Debug, Default, Deserialize)]
pub struct FinalizeRequest {
    #[serde(default)]
    pub policy: PolicyKind,
}

/// Finalize every pending entry under the requested policy
pub async fn finalize(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    request: Option<Json<FinalizeRequest>>,
) -> Result<Json<FinalizeReport>, ApiError> {
    let policy = request.map(|Json(r)| r.policy).unwrap_or_default();
    let session = load_session(&state, id).await?;
    let mut session = session.lock().await;

    // Entries the user never opened still need candidates before a policy can pick
    if policy == PolicyKind::AutoTopMatch {
        session.queue_mut().prefetch_all(state.lookup.as_ref()).await;
    }

    Ok(Json(session.finalize_with(policy.policy())))
}

/// Download every processed book as the catalog-import CSV
pub async fn export_csv(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let session = load_session(&state, id).await?;
    let session = session.lock().await;

    let exporter = LibraryThingCsv::new();
    let mut body = Vec::new();
    exporter
        .export(session.processed(), &mut body)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    tracing::debug!(
        "Exported {} books from session {} as {}",
        session.processed().len(),
        id,
        exporter.format_name()
    );

    let headers = [
        (header::CONTENT_TYPE, exporter.mime_type().to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", exporter.file_name()),
        ),
    ];
    Ok((headers, body))
}
