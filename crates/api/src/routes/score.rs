use axum::routing::get;
use axum::Router;

use crate::handlers::score;
use crate::state::AppState;

/// Routes mounted at `/scores`.
///
/// ```text
/// GET    /       -> list_scores
/// POST   /       -> create_score
/// GET    /{id}   -> get_score
/// DELETE /{id}   -> delete_score
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(score::list_scores).post(score::create_score))
        .route("/{id}", get(score::get_score).delete(score::delete_score))
}
