//! Repository for the `post_comments` table.
//!
//! Inserts and deletes keep `posts.comment_count` in step inside one
//! transaction.

use lumina_core::types::DbId;
use sqlx::PgPool;

use crate::models::comment::{Comment, CommentWithAuthor};

const COLUMNS: &str = "id, post_id, user_id, content, created_at";

pub struct CommentRepo;

impl CommentRepo {
    /// Add a comment and bump the post's comment counter.
    pub async fn create(
        pool: &PgPool,
        post_id: DbId,
        user_id: DbId,
        content: &str,
    ) -> Result<Comment, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO post_comments (post_id, user_id, content)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let comment = sqlx::query_as::<_, Comment>(&query)
            .bind(post_id)
            .bind(user_id)
            .bind(content)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("UPDATE posts SET comment_count = comment_count + 1 WHERE id = $1")
            .bind(post_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(comment)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM post_comments WHERE id = $1");
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a comment with the commenter's username.
    pub async fn find_with_author(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<CommentWithAuthor>, sqlx::Error> {
        sqlx::query_as::<_, CommentWithAuthor>(
            "SELECT c.id, c.post_id, c.user_id, c.content, c.created_at, u.username
             FROM post_comments c JOIN users u ON u.id = c.user_id
             WHERE c.id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Comments on a post, oldest first.
    pub async fn list_for_post(
        pool: &PgPool,
        post_id: DbId,
    ) -> Result<Vec<CommentWithAuthor>, sqlx::Error> {
        sqlx::query_as::<_, CommentWithAuthor>(
            "SELECT c.id, c.post_id, c.user_id, c.content, c.created_at, u.username
             FROM post_comments c JOIN users u ON u.id = c.user_id
             WHERE c.post_id = $1
             ORDER BY c.created_at ASC, c.id ASC",
        )
        .bind(post_id)
        .fetch_all(pool)
        .await
    }

    /// Delete a comment and decrement the post's counter.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let post_id: Option<(DbId,)> =
            sqlx::query_as("DELETE FROM post_comments WHERE id = $1 RETURNING post_id")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;

        let Some((post_id,)) = post_id else {
            return Ok(false);
        };

        sqlx::query(
            "UPDATE posts SET comment_count = GREATEST(comment_count - 1, 0) WHERE id = $1",
        )
        .bind(post_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(true)
    }
}
