//! Handlers for post comments.

use axum::extract::State;
use axum::http::StatusCode;
use lumina_core::comments::validate_comment_content;
use lumina_core::error::CoreError;
use lumina_core::types::DbId;
use lumina_db::models::comment::{CommentResponse, CreateComment};
use lumina_db::repositories::CommentRepo;

use crate::error::AppResult;
use crate::extract::{Json, Path};
use crate::handlers::posts::ensure_exists;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/posts/{id}/comments
///
/// Oldest first.
pub async fn list_comments(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(post_id): Path<DbId>,
) -> AppResult<Json<Vec<CommentResponse>>> {
    ensure_exists(&state, post_id).await?;
    let comments = CommentRepo::list_for_post(&state.pool, post_id).await?;
    Ok(Json(comments.into_iter().map(CommentResponse::from).collect()))
}

/// POST /api/posts/{id}/comments
pub async fn create_comment(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(post_id): Path<DbId>,
    Json(input): Json<CreateComment>,
) -> AppResult<Json<CommentResponse>> {
    validate_comment_content(&input.content).map_err(CoreError::Validation)?;
    ensure_exists(&state, post_id).await?;

    let comment =
        CommentRepo::create(&state.pool, post_id, auth.user_id, input.content.trim()).await?;

    tracing::info!(
        user_id = auth.user_id,
        post_id,
        comment_id = comment.id,
        "Comment created"
    );

    let row = CommentRepo::find_with_author(&state.pool, comment.id)
        .await?
        .ok_or(CoreError::not_found("Comment", comment.id))?;
    Ok(Json(row.into()))
}

/// DELETE /api/comments/{id}
///
/// Only the comment's author may delete it.
pub async fn delete_comment(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let comment = CommentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::not_found("Comment", id))?;
    if comment.user_id != auth.user_id {
        return Err(CoreError::not_owner("comment").into());
    }

    CommentRepo::delete(&state.pool, id).await?;

    tracing::info!(user_id = auth.user_id, comment_id = id, "Comment deleted");

    Ok(StatusCode::OK)
}
