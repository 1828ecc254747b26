//! Post comment model and DTOs.

use lumina_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `post_comments` table.
#[derive(Debug, Clone, FromRow)]
pub struct Comment {
    pub id: DbId,
    pub post_id: DbId,
    pub user_id: DbId,
    pub content: String,
    pub created_at: Timestamp,
}

/// A comment joined with the commenter's username.
#[derive(Debug, Clone, FromRow)]
pub struct CommentWithAuthor {
    #[sqlx(flatten)]
    pub comment: Comment,
    pub username: String,
}

/// Comment as returned by the API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: DbId,
    pub post_id: DbId,
    pub user_id: DbId,
    pub username: String,
    pub content: String,
    pub create_time: Timestamp,
}

impl From<CommentWithAuthor> for CommentResponse {
    fn from(row: CommentWithAuthor) -> Self {
        Self {
            id: row.comment.id,
            post_id: row.comment.post_id,
            user_id: row.comment.user_id,
            username: row.username,
            content: row.comment.content,
            create_time: row.comment.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateComment {
    pub content: String,
}
