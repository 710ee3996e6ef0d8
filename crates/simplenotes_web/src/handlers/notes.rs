//! Note HTTP handlers.
//!
//! Handlers stay thin: lock the connection, build a repository + service,
//! run one use-case, map the result. Validation failures answer with the
//! collected messages and the submitted form echoed back, so clients can
//! re-present it with the user's input intact.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use log::info;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use simplenotes_core::{Note, NoteForm, NoteService, NoteServiceError, SqliteNoteRepository};
use std::sync::MutexGuard;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Query parameters for the note listing.
#[derive(Debug, Deserialize)]
pub struct ListNotesQuery {
    pub limit: Option<u32>,
}

/// Wire representation of one note.
#[derive(Debug, Serialize)]
pub struct NoteResponse {
    pub id: Uuid,
    pub body: String,
    pub date: DateTime<Utc>,
    pub display_date: String,
    pub display_time: String,
    pub tags: Vec<String>,
}

impl From<Note> for NoteResponse {
    fn from(note: Note) -> Self {
        Self {
            display_date: note.display_date(),
            display_time: note.display_time(),
            id: note.id,
            body: note.body,
            date: note.date,
            tags: note.tags,
        }
    }
}

/// List response with the normalized limit that was applied.
#[derive(Debug, Serialize)]
pub struct NotesListResponse {
    pub data: Vec<NoteResponse>,
    pub applied_limit: u32,
}

/// `GET /api/v1/notes`: recent notes, newest date first.
pub async fn list_notes(
    State(state): State<AppState>,
    Query(query): Query<ListNotesQuery>,
) -> Result<Json<NotesListResponse>, ApiError> {
    let mut conn = lock_db(&state)?;
    let repo = SqliteNoteRepository::try_new(&mut conn).map_err(NoteServiceError::from)?;
    let service = NoteService::new(repo);

    let page = service.list_recent(query.limit)?;
    Ok(Json(NotesListResponse {
        data: page.items.into_iter().map(NoteResponse::from).collect(),
        applied_limit: page.applied_limit,
    }))
}

/// `GET /api/v1/notes/:id`.
pub async fn get_note(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<NoteResponse>, ApiError> {
    let mut conn = lock_db(&state)?;
    let repo = SqliteNoteRepository::try_new(&mut conn).map_err(NoteServiceError::from)?;
    let service = NoteService::new(repo);

    let note = service.get_note(id)?;
    Ok(Json(NoteResponse::from(note)))
}

/// `POST /api/v1/notes`: validate and create.
pub async fn create_note(
    State(state): State<AppState>,
    Json(form): Json<NoteForm>,
) -> Result<Response, ApiError> {
    let mut conn = lock_db(&state)?;
    let repo = SqliteNoteRepository::try_new(&mut conn).map_err(NoteServiceError::from)?;
    let mut service = NoteService::new(repo);

    match service.create_note(&form) {
        Ok(note) => {
            info!("event=note_create module=web status=ok id={}", note.id);
            Ok((StatusCode::CREATED, Json(NoteResponse::from(note))).into_response())
        }
        Err(NoteServiceError::Validation(errors)) => Ok(validation_failure(errors, &form)),
        Err(err) => Err(err.into()),
    }
}

/// `PUT /api/v1/notes/:id`: validate and replace wholesale.
pub async fn update_note(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(form): Json<NoteForm>,
) -> Result<Response, ApiError> {
    let mut conn = lock_db(&state)?;
    let repo = SqliteNoteRepository::try_new(&mut conn).map_err(NoteServiceError::from)?;
    let mut service = NoteService::new(repo);

    match service.update_note(id, &form) {
        Ok(note) => {
            info!("event=note_update module=web status=ok id={}", note.id);
            Ok(Json(NoteResponse::from(note)).into_response())
        }
        Err(NoteServiceError::Validation(errors)) => Ok(validation_failure(errors, &form)),
        Err(err) => Err(err.into()),
    }
}

/// `DELETE /api/v1/notes/:id`: hard delete plus tag reclamation.
pub async fn delete_note(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let mut conn = lock_db(&state)?;
    let repo = SqliteNoteRepository::try_new(&mut conn).map_err(NoteServiceError::from)?;
    let mut service = NoteService::new(repo);

    service.delete_note(id)?;
    info!("event=note_delete module=web status=ok id={id}");
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/v1/tags`: all known tag names.
pub async fn list_tags(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    let mut conn = lock_db(&state)?;
    let repo = SqliteNoteRepository::try_new(&mut conn).map_err(NoteServiceError::from)?;
    let service = NoteService::new(repo);

    let tags = service.list_tags().map_err(NoteServiceError::from)?;
    Ok(Json(tags))
}

fn validation_failure(errors: Vec<String>, form: &NoteForm) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(serde_json::json!({
            "errors": errors,
            "form": form,
        })),
    )
        .into_response()
}

fn lock_db(state: &AppState) -> Result<MutexGuard<'_, Connection>, ApiError> {
    state
        .db
        .lock()
        .map_err(|_| ApiError::Internal("database lock poisoned".to_string()))
}
