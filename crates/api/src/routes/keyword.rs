use axum::routing::get;
use axum::Router;

use crate::handlers::keyword;
use crate::state::AppState;

/// Routes mounted at `/keywords`.
///
/// ```text
/// GET    /       -> list_keywords
/// POST   /       -> create_keyword
/// GET    /{id}   -> get_keyword
/// PUT    /{id}   -> update_keyword
/// DELETE /{id}   -> delete_keyword
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(keyword::list_keywords).post(keyword::create_keyword))
        .route(
            "/{id}",
            get(keyword::get_keyword)
                .put(keyword::update_keyword)
                .delete(keyword::delete_keyword),
        )
}
