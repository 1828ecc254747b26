//! Query parameter types for API handlers.

use serde::Deserialize;

/// `GET /notes?status=&includeDeleted=`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteListParams {
    pub status: Option<i16>,
    #[serde(default)]
    pub include_deleted: bool,
}

/// `DELETE /notes/{id}?permanent=`
#[derive(Debug, Default, Deserialize)]
pub struct DeleteNoteParams {
    #[serde(default)]
    pub permanent: bool,
}

/// `GET /posts/hot?limit=`
#[derive(Debug, Default, Deserialize)]
pub struct HotPostParams {
    pub limit: Option<i64>,
}
