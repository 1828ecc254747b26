//! Repository for the `notes` table.

use lumina_core::notes::{NOTE_STATUS_ACTIVE, NOTE_STATUS_DELETED};
use lumina_core::types::DbId;
use sqlx::PgPool;

use crate::models::note::{CreateNote, Note, UpdateNote};

const COLUMNS: &str = "id, user_id, title, content, category_id, tags, attachment_paths, \
                       is_shared, status, created_at, updated_at";

/// Provides CRUD operations for study notes.
pub struct NoteRepo;

impl NoteRepo {
    /// Insert a note owned by `user_id`. New notes are always active.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateNote,
    ) -> Result<Note, sqlx::Error> {
        let query = format!(
            "INSERT INTO notes
                (user_id, title, content, category_id, tags, attachment_paths, is_shared, status)
             VALUES ($1, $2, COALESCE($3, ''), $4,
                     COALESCE($5, '{{}}'::text[]), COALESCE($6, '{{}}'::text[]),
                     COALESCE($7, false), $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(user_id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.category_id)
            .bind(&input.tags)
            .bind(&input.attachment_paths)
            .bind(input.shared)
            .bind(NOTE_STATUS_ACTIVE)
            .fetch_one(pool)
            .await
    }

    /// Find a note by ID regardless of status.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Note>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notes WHERE id = $1");
        sqlx::query_as::<_, Note>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's notes, most recently updated first.
    ///
    /// `status = None` returns notes in every status, including deleted ones.
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: DbId,
        status: Option<i16>,
    ) -> Result<Vec<Note>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notes
             WHERE user_id = $1 AND ($2::SMALLINT IS NULL OR status = $2)
             ORDER BY updated_at DESC, id DESC"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(user_id)
            .bind(status)
            .fetch_all(pool)
            .await
    }

    /// Update a note. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateNote,
    ) -> Result<Option<Note>, sqlx::Error> {
        let query = format!(
            "UPDATE notes SET
                title = COALESCE($2, title),
                content = COALESCE($3, content),
                category_id = COALESCE($4, category_id),
                tags = COALESCE($5, tags),
                attachment_paths = COALESCE($6, attachment_paths),
                is_shared = COALESCE($7, is_shared),
                status = COALESCE($8, status)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.category_id)
            .bind(&input.tags)
            .bind(&input.attachment_paths)
            .bind(input.shared)
            .bind(input.status)
            .fetch_optional(pool)
            .await
    }

    /// Mark a note deleted. Returns `true` if an active note was changed.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE notes SET status = $2 WHERE id = $1 AND status <> $2")
            .bind(id)
            .bind(NOTE_STATUS_DELETED)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Permanently remove a note. Returns `true` if a row was deleted.
    pub async fn hard_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
