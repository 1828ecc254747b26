//! Handlers for the community feed: posts, likes and favorites.

use axum::extract::State;
use axum::http::StatusCode;
use lumina_core::error::CoreError;
use lumina_core::posts::{clamp_hot_limit, validate_post_content, validate_post_title};
use lumina_core::types::DbId;
use lumina_db::models::post::{CreatePost, Post, PostResponse, UpdatePost};
use lumina_db::repositories::{FavoriteRepo, LikeRepo, PostRepo};

use crate::error::AppResult;
use crate::extract::{Json, Path, Query};
use crate::middleware::auth::AuthUser;
use crate::query::HotPostParams;
use crate::state::AppState;

/// GET /api/posts
///
/// All posts with their authors, newest first.
pub async fn list_posts(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<PostResponse>>> {
    let posts = PostRepo::list_with_authors(&state.pool).await?;
    Ok(Json(posts.into_iter().map(PostResponse::from).collect()))
}

/// GET /api/posts/hot?limit=
pub async fn hot_posts(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<HotPostParams>,
) -> AppResult<Json<Vec<PostResponse>>> {
    let limit = clamp_hot_limit(params.limit);
    let posts = PostRepo::list_hot(&state.pool, limit).await?;
    Ok(Json(posts.into_iter().map(PostResponse::from).collect()))
}

/// GET /api/posts/{id}
pub async fn get_post(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<PostResponse>> {
    post_response(&state, id).await.map(Json)
}

/// POST /api/posts
pub async fn create_post(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreatePost>,
) -> AppResult<Json<PostResponse>> {
    validate_post_title(&input.title).map_err(CoreError::Validation)?;
    validate_post_content(&input.content).map_err(CoreError::Validation)?;

    let post = PostRepo::create(&state.pool, auth.user_id, &input).await?;

    tracing::info!(user_id = auth.user_id, post_id = post.id, "Post created");

    post_response(&state, post.id).await.map(Json)
}

/// PUT|POST /api/posts/{id}
///
/// Author only. Omitted fields keep their value.
pub async fn update_post(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePost>,
) -> AppResult<Json<PostResponse>> {
    load_authored(&state, id, &auth).await?;

    if let Some(title) = &input.title {
        validate_post_title(title).map_err(CoreError::Validation)?;
    }
    if let Some(content) = &input.content {
        validate_post_content(content).map_err(CoreError::Validation)?;
    }

    PostRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(CoreError::not_found("Post", id))?;

    tracing::info!(user_id = auth.user_id, post_id = id, "Post updated");

    post_response(&state, id).await.map(Json)
}

/// DELETE /api/posts/{id}
///
/// Author only. Likes, favorites and comments go with the post.
pub async fn delete_post(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    load_authored(&state, id, &auth).await?;
    PostRepo::delete(&state.pool, id).await?;

    tracing::info!(user_id = auth.user_id, post_id = id, "Post deleted");

    Ok(StatusCode::OK)
}

/// POST /api/posts/{id}/like
pub async fn like_post(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    ensure_exists(&state, id).await?;
    let changed = LikeRepo::like(&state.pool, auth.user_id, id).await?;
    tracing::debug!(user_id = auth.user_id, post_id = id, changed, "Post liked");
    Ok(StatusCode::OK)
}

/// POST /api/posts/{id}/unlike
pub async fn unlike_post(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    ensure_exists(&state, id).await?;
    let changed = LikeRepo::unlike(&state.pool, auth.user_id, id).await?;
    tracing::debug!(user_id = auth.user_id, post_id = id, changed, "Post unliked");
    Ok(StatusCode::OK)
}

/// POST /api/posts/{id}/favorite
pub async fn favorite_post(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    ensure_exists(&state, id).await?;
    let changed = FavoriteRepo::add(&state.pool, auth.user_id, id).await?;
    tracing::debug!(user_id = auth.user_id, post_id = id, changed, "Post favorited");
    Ok(StatusCode::OK)
}

/// POST /api/posts/{id}/unfavorite
pub async fn unfavorite_post(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    ensure_exists(&state, id).await?;
    let changed = FavoriteRepo::remove(&state.pool, auth.user_id, id).await?;
    tracing::debug!(user_id = auth.user_id, post_id = id, changed, "Post unfavorited");
    Ok(StatusCode::OK)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

pub(crate) async fn ensure_exists(state: &AppState, id: DbId) -> AppResult<Post> {
    let post = PostRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::not_found("Post", id))?;
    Ok(post)
}

async fn load_authored(state: &AppState, id: DbId, auth: &AuthUser) -> AppResult<Post> {
    let post = ensure_exists(state, id).await?;
    if post.user_id != auth.user_id {
        return Err(CoreError::not_owner("post").into());
    }
    Ok(post)
}

async fn post_response(state: &AppState, id: DbId) -> AppResult<PostResponse> {
    let post = PostRepo::find_with_author(&state.pool, id)
        .await?
        .ok_or(CoreError::not_found("Post", id))?;
    Ok(post.into())
}
