//! Study note model and DTOs.

use lumina_core::notes::Subject;
use lumina_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `notes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub content: String,
    pub category_id: Option<i32>,
    pub tags: Vec<String>,
    pub attachment_paths: Vec<String>,
    #[serde(rename = "shared")]
    pub is_shared: bool,
    pub status: i16,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A note plus the subject label derived from its category.
#[derive(Debug, Serialize)]
pub struct NoteResponse {
    #[serde(flatten)]
    pub note: Note,
    pub subject: Option<&'static str>,
}

impl From<Note> for NoteResponse {
    fn from(note: Note) -> Self {
        let subject = note
            .category_id
            .and_then(Subject::from_category_id)
            .map(Subject::label);
        Self { note, subject }
    }
}

/// DTO for creating a note. The owner comes from the access token.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNote {
    pub title: String,
    pub content: Option<String>,
    pub category_id: Option<i32>,
    pub tags: Option<Vec<String>>,
    pub attachment_paths: Option<Vec<String>>,
    pub shared: Option<bool>,
}

/// DTO for updating a note. All fields are optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNote {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category_id: Option<i32>,
    pub tags: Option<Vec<String>>,
    pub attachment_paths: Option<Vec<String>>,
    pub shared: Option<bool>,
    pub status: Option<i16>,
}
