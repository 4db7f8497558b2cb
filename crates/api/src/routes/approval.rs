use axum::routing::{get, post};
use axum::Router;

use crate::handlers::approval;
use crate::state::AppState;

/// Routes mounted at `/approvals`. `{kind}` is `quiz`, `keyword` or `report`.
///
/// ```text
/// POST /{kind}/{id}         -> decide
/// GET  /{kind}/{id}/votes   -> list_votes (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{kind}/{id}", post(approval::decide))
        .route("/{kind}/{id}/votes", get(approval::list_votes))
}
