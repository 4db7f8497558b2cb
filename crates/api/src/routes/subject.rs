use axum::routing::get;
use axum::Router;

use crate::handlers::subject;
use crate::state::AppState;

/// Routes mounted at `/subjects`.
///
/// ```text
/// GET    /       -> list_subjects
/// POST   /       -> create_subject
/// GET    /{id}   -> get_subject
/// PUT    /{id}   -> update_subject
/// DELETE /{id}   -> delete_subject
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(subject::list_subjects).post(subject::create_subject))
        .route(
            "/{id}",
            get(subject::get_subject)
                .put(subject::update_subject)
                .delete(subject::delete_subject),
        )
}
