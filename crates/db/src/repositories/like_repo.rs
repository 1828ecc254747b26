//! Repository for the `post_likes` table.
//!
//! Like rows and `posts.like_count` are always written in the same
//! transaction so the counter equals the number of like rows.

use lumina_core::types::DbId;
use sqlx::PgPool;

pub struct LikeRepo;

impl LikeRepo {
    /// Record that `user_id` likes `post_id`.
    ///
    /// Returns `false` (and changes nothing) if the like already existed.
    pub async fn like(pool: &PgPool, user_id: DbId, post_id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let inserted = sqlx::query(
            "INSERT INTO post_likes (user_id, post_id) VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_post_likes_user_post DO NOTHING",
        )
        .bind(user_id)
        .bind(post_id)
        .execute(&mut *tx)
        .await?
        .rows_affected()
            > 0;

        if inserted {
            sqlx::query("UPDATE posts SET like_count = like_count + 1 WHERE id = $1")
                .bind(post_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(inserted)
    }

    /// Remove a like. Returns `false` if there was nothing to remove.
    pub async fn unlike(pool: &PgPool, user_id: DbId, post_id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let removed = sqlx::query("DELETE FROM post_likes WHERE user_id = $1 AND post_id = $2")
            .bind(user_id)
            .bind(post_id)
            .execute(&mut *tx)
            .await?
            .rows_affected()
            > 0;

        if removed {
            sqlx::query(
                "UPDATE posts SET like_count = GREATEST(like_count - 1, 0) WHERE id = $1",
            )
            .bind(post_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(removed)
    }

    pub async fn exists(pool: &PgPool, user_id: DbId, post_id: DbId) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM post_likes WHERE user_id = $1 AND post_id = $2)",
        )
        .bind(user_id)
        .bind(post_id)
        .fetch_one(pool)
        .await?;
        Ok(exists)
    }
}
