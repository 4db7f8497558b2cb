use axum::routing::get;
use axum::Router;

use crate::handlers::report;
use crate::state::AppState;

/// Routes mounted at `/reports`. Reports are resolved via `/approvals/report/{id}`.
///
/// ```text
/// GET    /       -> list_reports
/// POST   /       -> create_report
/// GET    /{id}   -> get_report
/// DELETE /{id}   -> delete_report
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(report::list_reports).post(report::create_report))
        .route("/{id}", get(report::get_report).delete(report::delete_report))
}
