pub mod approval;
pub mod auth;
pub mod category;
pub mod health;
pub mod keyword;
pub mod quiz;
pub mod report;
pub mod score;
pub mod stats;
pub mod subject;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                     register (public)
/// /auth/login                        login (public)
/// /auth/me                           current user
/// /auth/users                        list users (admin)
/// /auth/users/{id}                   update profile or role
///
/// /subjects                          list, create (super admin)
/// /subjects/{id}                     get, update, delete (super admin)
///
/// /categories                        list (?subject_id), create (admin)
/// /categories/{id}                   get, update, delete (admin)
///
/// /quizzes                           list (?subject_id, ?category_id, ?status), create
/// /quizzes/{id}                      get, update (owner/admin), delete (admin)
///
/// /keywords                          list, create
/// /keywords/{id}                     get, update (owner/admin), delete (super admin)
///
/// /reports                           list (?type, ?user_id), create
/// /reports/{id}                      get, delete (super admin)
///
/// /approvals/{kind}/{id}             decide (admin)
/// /approvals/{kind}/{id}/votes       live ballot (admin)
///
/// /scores                            list (?user_id), create
/// /scores/{id}                       get, delete (owner/admin)
///
/// /stats/overview                    counters (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        // Taxonomy.
        .nest("/subjects", subject::router())
        .nest("/categories", category::router())
        // Contributed content.
        .nest("/quizzes", quiz::router())
        .nest("/keywords", keyword::router())
        .nest("/reports", report::router())
        // Multi-admin approval workflow.
        .nest("/approvals", approval::router())
        .nest("/scores", score::router())
        .nest("/stats", stats::router())
}
