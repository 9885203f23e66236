use axum::{
    body::Bytes,
    extract::{FromRequestParts, Path, State},
    http::{request::Parts, StatusCode},
    Json,
};

use super::error::ApiError;
use super::validation::{invalid_note_id, parse_note_id, parse_note_input};
use crate::db::Database;
use crate::models::*;

/// The `{id}` path segment as a note id.
///
/// Any path rejection, including undecodable percent-escapes, becomes
/// [`ApiError::MalformedId`] so the client always gets a JSON body.
pub struct NoteId(pub i64);

impl<S> FromRequestParts<S> for NoteId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                tracing::debug!("Path rejected: {}", rejection.body_text());
                ApiError::MalformedId(invalid_note_id())
            })?;

        parse_note_id(&raw).map(NoteId).map_err(ApiError::MalformedId)
    }
}

// ============================================================
// Notes
// ============================================================

pub async fn list_notes(State(db): State<Database>) -> Result<Json<Vec<Note>>, ApiError> {
    Ok(Json(db.list_notes()?))
}

pub async fn get_note(
    State(db): State<Database>,
    NoteId(id): NoteId,
) -> Result<Json<Note>, ApiError> {
    db.get_note(id)?.map(Json).ok_or(ApiError::NotFound)
}

pub async fn create_note(
    State(db): State<Database>,
    body: Bytes,
) -> Result<Json<Note>, ApiError> {
    let input = parse_note_input(&body)?;
    let note = db.create_note(input)?;
    tracing::info!("Created note {}", note.id);
    Ok(Json(note))
}

pub async fn update_note(
    State(db): State<Database>,
    NoteId(id): NoteId,
    body: Bytes,
) -> Result<Json<Note>, ApiError> {
    let input = parse_note_input(&body)?;
    db.update_note(id, input)?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

pub async fn delete_note(
    State(db): State<Database>,
    NoteId(id): NoteId,
) -> Result<StatusCode, ApiError> {
    if db.delete_note(id)? {
        tracing::info!("Deleted note {}", id);
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}
