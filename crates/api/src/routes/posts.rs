//! Route definitions for the community feed.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::{comments, posts};
use crate::state::AppState;

/// Routes mounted at `/posts`.
///
/// ```text
/// GET    /                -> list_posts
/// POST   /                -> create_post
/// GET    /hot             -> hot_posts (?limit)
/// GET    /{id}            -> get_post
/// PUT    /{id}            -> update_post
/// POST   /{id}            -> update_post (older clients)
/// DELETE /{id}            -> delete_post
/// POST   /{id}/like       -> like_post
/// POST   /{id}/unlike     -> unlike_post
/// POST   /{id}/favorite   -> favorite_post
/// POST   /{id}/unfavorite -> unfavorite_post
/// GET    /{id}/comments   -> list_comments
/// POST   /{id}/comments   -> create_comment
/// ```
pub fn posts_router() -> Router<AppState> {
    Router::new()
        .route("/", get(posts::list_posts).post(posts::create_post))
        .route("/hot", get(posts::hot_posts))
        .route(
            "/{id}",
            get(posts::get_post)
                .put(posts::update_post)
                .post(posts::update_post)
                .delete(posts::delete_post),
        )
        .route("/{id}/like", post(posts::like_post))
        .route("/{id}/unlike", post(posts::unlike_post))
        .route("/{id}/favorite", post(posts::favorite_post))
        .route("/{id}/unfavorite", post(posts::unfavorite_post))
        .route(
            "/{id}/comments",
            get(comments::list_comments).post(comments::create_comment),
        )
}

/// Routes mounted at `/comments`.
///
/// ```text
/// DELETE /{id} -> delete_comment (author only)
/// ```
pub fn comments_router() -> Router<AppState> {
    Router::new().route("/{id}", delete(comments::delete_comment))
}
