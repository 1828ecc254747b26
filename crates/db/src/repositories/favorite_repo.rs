//! Repository for the `post_favorites` table.

use lumina_core::types::DbId;
use sqlx::PgPool;

use crate::models::post::PostWithAuthor;
use crate::repositories::post_repo::JOINED_COLUMNS;

pub struct FavoriteRepo;

impl FavoriteRepo {
    /// Bookmark a post. Returns `false` if it was already a favorite.
    pub async fn add(pool: &PgPool, user_id: DbId, post_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO post_favorites (user_id, post_id) VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_post_favorites_user_post DO NOTHING",
        )
        .bind(user_id)
        .bind(post_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove a bookmark. Returns `false` if there was none.
    pub async fn remove(pool: &PgPool, user_id: DbId, post_id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM post_favorites WHERE user_id = $1 AND post_id = $2")
                .bind(user_id)
                .bind(post_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn exists(pool: &PgPool, user_id: DbId, post_id: DbId) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM post_favorites WHERE user_id = $1 AND post_id = $2)",
        )
        .bind(user_id)
        .bind(post_id)
        .fetch_one(pool)
        .await?;
        Ok(exists)
    }

    /// Posts a user has bookmarked, most recently bookmarked first.
    pub async fn list_posts_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<PostWithAuthor>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM post_favorites f
             JOIN posts p ON p.id = f.post_id
             JOIN users u ON u.id = p.user_id
             WHERE f.user_id = $1
             ORDER BY f.created_at DESC, f.id DESC"
        );
        sqlx::query_as::<_, PostWithAuthor>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
