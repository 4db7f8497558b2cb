use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /register   -> register (public)
/// POST /login      -> login (public)
/// GET  /me         -> me
/// GET  /users      -> list_users (admin)
/// PUT  /users/{id} -> update_user (self, or super admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/me", get(auth::me))
        .route("/users", get(auth::list_users))
        .route("/users/{id}", put(auth::update_user))
}
