//! Repository for the `posts` table.

use lumina_core::posts::POST_STATUS_PUBLISHED;
use lumina_core::types::DbId;
use sqlx::PgPool;

use crate::models::post::{CreatePost, Post, PostWithAuthor, UpdatePost};

const COLUMNS: &str = "id, user_id, title, content, view_count, like_count, comment_count, \
                       status, created_at, updated_at";

/// Post columns qualified with `p.` plus the author's public fields, for
/// queries joining `posts p` with `users u`.
pub(crate) const JOINED_COLUMNS: &str = "p.id, p.user_id, p.title, p.content, p.view_count, \
                                         p.like_count, p.comment_count, p.status, p.created_at, \
                                         p.updated_at, u.username AS author_username, \
                                         u.avatar AS author_avatar";

/// Provides CRUD and feed queries for community posts.
pub struct PostRepo;

impl PostRepo {
    /// Insert a post authored by `user_id`. Counters start at zero.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreatePost,
    ) -> Result<Post, sqlx::Error> {
        let query = format!(
            "INSERT INTO posts (user_id, title, content, status)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(user_id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(POST_STATUS_PUBLISHED)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Post>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM posts WHERE id = $1");
        sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a post together with its author.
    pub async fn find_with_author(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<PostWithAuthor>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM posts p JOIN users u ON u.id = p.user_id
             WHERE p.id = $1"
        );
        sqlx::query_as::<_, PostWithAuthor>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The community feed: every post, newest first.
    pub async fn list_with_authors(pool: &PgPool) -> Result<Vec<PostWithAuthor>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM posts p JOIN users u ON u.id = p.user_id
             ORDER BY p.created_at DESC, p.id DESC"
        );
        sqlx::query_as::<_, PostWithAuthor>(&query)
            .fetch_all(pool)
            .await
    }

    /// The `limit` most-liked posts. Ties go to the newer post.
    pub async fn list_hot(pool: &PgPool, limit: i64) -> Result<Vec<PostWithAuthor>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM posts p JOIN users u ON u.id = p.user_id
             ORDER BY p.like_count DESC, p.created_at DESC, p.id DESC
             LIMIT $1"
        );
        sqlx::query_as::<_, PostWithAuthor>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Update a post's title and/or content.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePost,
    ) -> Result<Option<Post>, sqlx::Error> {
        let query = format!(
            "UPDATE posts SET
                title = COALESCE($2, title),
                content = COALESCE($3, content)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.content)
            .fetch_optional(pool)
            .await
    }

    /// Delete a post; likes, favorites and comments cascade.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
