pub mod auth;
pub mod health;
pub mod notes;
pub mod posts;
pub mod server;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /health                          service + database health (public)
/// /server/info                     server metadata (public)
///
/// /auth/register                   create account (public)
/// /auth/login                      login (public)
/// /auth/refresh                    re-issue token (Authorization header)
///
/// /users/me                        get, update own profile
/// /users/me/favorites              own favorite posts
/// /users/{user_id}/favorites       same, own id only
///
/// /notes                           list, create
/// /notes/{id}                      get, update, delete
///
/// /posts                           list, create
/// /posts/hot                       most liked
/// /posts/{id}                      get, update, delete
/// /posts/{id}/like|unlike          like toggles
/// /posts/{id}/favorite|unfavorite  favorite toggles
/// /posts/{id}/comments             list, create
///
/// /comments/{id}                   delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(server::router())
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/notes", notes::router())
        .nest("/posts", posts::posts_router())
        .nest("/comments", posts::comments_router())
}
