//! Handlers for the caller's own profile and favorites.

use axum::extract::State;
use lumina_core::error::CoreError;
use lumina_core::types::DbId;
use lumina_core::users::{
    validate_avatar, validate_email, validate_student_type, validate_username,
};
use lumina_db::models::post::PostResponse;
use lumina_db::models::user::{UpdateProfile, UserResponse};
use lumina_db::repositories::{FavoriteRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{Json, Path};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/users/me
pub async fn get_me(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(CoreError::not_found("User", auth.user_id))?;
    Ok(Json(user.into()))
}

/// PUT /api/users/me
///
/// Partial profile update. Username and email must stay unique.
pub async fn update_me(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateProfile>,
) -> AppResult<Json<UserResponse>> {
    let username = input
        .username
        .as_deref()
        .map(validate_username)
        .transpose()
        .map_err(CoreError::Validation)?;
    let email = input
        .email
        .as_deref()
        .map(validate_email)
        .transpose()
        .map_err(CoreError::Validation)?;
    if let Some(avatar) = &input.avatar {
        validate_avatar(avatar).map_err(CoreError::Validation)?;
    }
    if let Some(student_type) = &input.student_type {
        validate_student_type(student_type).map_err(CoreError::Validation)?;
    }

    if let Some(name) = &username {
        if let Some(existing) = UserRepo::find_by_username(&state.pool, name).await? {
            if existing.id != auth.user_id {
                return Err(CoreError::Conflict("Username already exists".into()).into());
            }
        }
    }
    if let Some(addr) = &email {
        if let Some(existing) = UserRepo::find_by_email(&state.pool, addr).await? {
            if existing.id != auth.user_id {
                return Err(CoreError::Conflict("Email already exists".into()).into());
            }
        }
    }

    let update = UpdateProfile {
        username,
        email,
        avatar: input.avatar,
        student_type: input.student_type,
    };
    let user = UserRepo::update_profile(&state.pool, auth.user_id, &update)
        .await?
        .ok_or(CoreError::not_found("User", auth.user_id))?;

    tracing::info!(user_id = user.id, "Profile updated");

    Ok(Json(user.into()))
}

/// GET /api/users/me/favorites
pub async fn my_favorites(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<PostResponse>>> {
    list_favorites(&state, auth.user_id).await.map(Json)
}

/// GET /api/users/{user_id}/favorites
///
/// Favorites are private: only the owner may list them.
pub async fn user_favorites(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<Json<Vec<PostResponse>>> {
    if user_id != auth.user_id {
        return Err(AppError::forbidden(
            "You can only view your own favorites",
        ));
    }
    list_favorites(&state, user_id).await.map(Json)
}

async fn list_favorites(state: &AppState, user_id: DbId) -> AppResult<Vec<PostResponse>> {
    let posts = FavoriteRepo::list_posts_for_user(&state.pool, user_id).await?;
    Ok(posts.into_iter().map(PostResponse::from).collect())
}
