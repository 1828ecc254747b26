use axum::routing::get;
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET  /me                 -> get_me
/// PUT  /me                 -> update_me
/// GET  /me/favorites       -> my_favorites
/// GET  /{user_id}/favorites -> user_favorites (own id only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me", get(users::get_me).put(users::update_me))
        .route("/me/favorites", get(users::my_favorites))
        .route("/{user_id}/favorites", get(users::user_favorites))
}
