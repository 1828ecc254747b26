//! Community post model and DTOs.

use lumina_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `posts` table.
#[derive(Debug, Clone, FromRow)]
pub struct Post {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub content: String,
    pub view_count: i32,
    pub like_count: i32,
    pub comment_count: i32,
    pub status: i16,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A post joined with its author's public fields.
#[derive(Debug, Clone, FromRow)]
pub struct PostWithAuthor {
    #[sqlx(flatten)]
    pub post: Post,
    pub author_username: String,
    pub author_avatar: Option<String>,
}

/// Public author summary embedded in every post response.
#[derive(Debug, Clone, Serialize)]
pub struct PostAuthor {
    pub id: DbId,
    pub username: String,
    pub avatar: Option<String>,
}

/// Post as returned by the API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: DbId,
    pub user: PostAuthor,
    pub title: String,
    pub content: String,
    pub view_count: i32,
    pub like_count: i32,
    pub comment_count: i32,
    pub status: i16,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<PostWithAuthor> for PostResponse {
    fn from(row: PostWithAuthor) -> Self {
        let post = row.post;
        Self {
            id: post.id,
            user: PostAuthor {
                id: post.user_id,
                username: row.author_username,
                avatar: row.author_avatar,
            },
            title: post.title,
            content: post.content,
            view_count: post.view_count,
            like_count: post.like_count,
            comment_count: post.comment_count,
            status: post.status,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// DTO for creating a post. Counters always start at zero.
#[derive(Debug, Deserialize)]
pub struct CreatePost {
    pub title: String,
    pub content: String,
}

/// DTO for editing a post. All fields are optional.
#[derive(Debug, Default, Deserialize)]
pub struct UpdatePost {
    pub title: Option<String>,
    pub content: Option<String>,
}
