//! Handlers for study notes.
//!
//! Notes are private to their owner. Deletion is logical by default
//! (status 0); `?permanent=true` removes the row.

use axum::extract::State;
use lumina_core::error::CoreError;
use lumina_core::notes::{
    validate_attachment_paths, validate_category_id, validate_note_content,
    validate_note_status, validate_note_title, validate_tags, NOTE_STATUS_ACTIVE,
};
use lumina_core::types::DbId;
use lumina_db::models::note::{CreateNote, Note, NoteResponse, UpdateNote};
use lumina_db::repositories::NoteRepo;
use serde::Serialize;

use crate::error::AppResult;
use crate::extract::{Json, Path, Query};
use crate::middleware::auth::AuthUser;
use crate::query::{DeleteNoteParams, NoteListParams};
use crate::response::{Envelope, StatusMessage};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct NoteList {
    pub notes: Vec<NoteResponse>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct NotePayload {
    pub note: NoteResponse,
}

/// GET /api/notes?status=&includeDeleted=
///
/// Active notes by default; an explicit `status` wins over `includeDeleted`.
pub async fn list_notes(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<NoteListParams>,
) -> AppResult<Json<Envelope<NoteList>>> {
    let status = match params.status {
        Some(status) => {
            validate_note_status(status).map_err(CoreError::Validation)?;
            Some(status)
        }
        None if params.include_deleted => None,
        None => Some(NOTE_STATUS_ACTIVE),
    };

    let notes: Vec<NoteResponse> = NoteRepo::list_by_user(&state.pool, auth.user_id, status)
        .await?
        .into_iter()
        .map(NoteResponse::from)
        .collect();
    let count = notes.len();

    Ok(Json(Envelope::new(NoteList { notes, count }, "Notes retrieved")))
}

/// POST /api/notes
pub async fn create_note(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateNote>,
) -> AppResult<Json<Envelope<NotePayload>>> {
    validate_note_title(&input.title).map_err(CoreError::Validation)?;
    validate_optional_fields(
        input.content.as_deref(),
        input.category_id,
        input.tags.as_deref(),
        input.attachment_paths.as_deref(),
    )?;

    let note = NoteRepo::create(&state.pool, auth.user_id, &input).await?;

    tracing::info!(user_id = auth.user_id, note_id = note.id, "Note created");

    Ok(Json(Envelope::new(
        NotePayload { note: note.into() },
        "Note created",
    )))
}

/// GET /api/notes/{id}
pub async fn get_note(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Envelope<NotePayload>>> {
    let note = load_owned(&state, id, &auth).await?;
    Ok(Json(Envelope::new(
        NotePayload { note: note.into() },
        "Note retrieved",
    )))
}

/// PUT /api/notes/{id}
///
/// Partial update; omitted fields keep their value.
pub async fn update_note(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateNote>,
) -> AppResult<Json<Envelope<NotePayload>>> {
    load_owned(&state, id, &auth).await?;

    if let Some(title) = &input.title {
        validate_note_title(title).map_err(CoreError::Validation)?;
    }
    validate_optional_fields(
        input.content.as_deref(),
        input.category_id,
        input.tags.as_deref(),
        input.attachment_paths.as_deref(),
    )?;
    if let Some(status) = input.status {
        validate_note_status(status).map_err(CoreError::Validation)?;
    }

    let note = NoteRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(CoreError::not_found("Note", id))?;

    tracing::info!(user_id = auth.user_id, note_id = id, "Note updated");

    Ok(Json(Envelope::new(
        NotePayload { note: note.into() },
        "Note updated",
    )))
}

/// DELETE /api/notes/{id}?permanent=
pub async fn delete_note(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<DeleteNoteParams>,
) -> AppResult<Json<StatusMessage>> {
    load_owned(&state, id, &auth).await?;

    let message = if params.permanent {
        NoteRepo::hard_delete(&state.pool, id).await?;
        "Note permanently deleted"
    } else {
        NoteRepo::soft_delete(&state.pool, id).await?;
        "Note deleted"
    };

    tracing::info!(
        user_id = auth.user_id,
        note_id = id,
        permanent = params.permanent,
        "Note deleted"
    );

    Ok(Json(StatusMessage::ok(message)))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fetch a note and require that the caller owns it.
async fn load_owned(state: &AppState, id: DbId, auth: &AuthUser) -> AppResult<Note> {
    let note = NoteRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::not_found("Note", id))?;
    if note.user_id != auth.user_id {
        return Err(CoreError::not_owner("note").into());
    }
    Ok(note)
}

fn validate_optional_fields(
    content: Option<&str>,
    category_id: Option<i32>,
    tags: Option<&[String]>,
    attachment_paths: Option<&[String]>,
) -> Result<(), CoreError> {
    if let Some(content) = content {
        validate_note_content(content).map_err(CoreError::Validation)?;
    }
    if let Some(category_id) = category_id {
        validate_category_id(category_id).map_err(CoreError::Validation)?;
    }
    if let Some(tags) = tags {
        validate_tags(tags).map_err(CoreError::Validation)?;
    }
    if let Some(paths) = attachment_paths {
        validate_attachment_paths(paths).map_err(CoreError::Validation)?;
    }
    Ok(())
}
