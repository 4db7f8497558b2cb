use axum::routing::get;
use axum::Router;

use crate::handlers::quiz;
use crate::state::AppState;

/// Routes mounted at `/quizzes`.
///
/// ```text
/// GET    /       -> list_quizzes
/// POST   /       -> create_quiz
/// GET    /{id}   -> get_quiz
/// PUT    /{id}   -> update_quiz
/// DELETE /{id}   -> delete_quiz
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(quiz::list_quizzes).post(quiz::create_quiz))
        .route(
            "/{id}",
            get(quiz::get_quiz)
                .put(quiz::update_quiz)
                .delete(quiz::delete_quiz),
        )
}
