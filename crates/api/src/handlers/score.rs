//! Handlers for recorded quiz attempts.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use quizbank_core::content::validate_score;
use quizbank_core::error::CoreError;
use quizbank_core::types::DbId;
use quizbank_db::models::score::{CreateScore, Score};
use quizbank_db::repositories::ScoreRepo;
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::handlers::subject::ensure_subject_exists;
use crate::middleware::auth::AuthUser;
use crate::query::UserFilterParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Load a score the caller may see: their own, or any for admins.
async fn visible_score(pool: &PgPool, auth: &AuthUser, id: DbId) -> AppResult<Score> {
    let score = ScoreRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Score", id }))?;
    if !auth.owns_or_admin(score.user_id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "You can only access your own scores".into(),
        )));
    }
    Ok(score)
}

/// POST /api/v1/scores
pub async fn create_score(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateScore>,
) -> AppResult<impl IntoResponse> {
    validate_score(
        input.score,
        input.full_score,
        input.questions.len(),
        input.category_ids.len(),
        input.time_taken_secs,
    )?;
    ensure_subject_exists(&state.pool, input.subject_id).await?;

    let score = ScoreRepo::create(&state.pool, auth.user_id, &input).await?;
    tracing::debug!(user_id = auth.user_id, score_id = score.id, "Score recorded");

    Ok((StatusCode::CREATED, Json(DataResponse { data: score })))
}

/// GET /api/v1/scores?user_id=
///
/// Defaults to the caller's own scores. Only admins may name another user.
pub async fn list_scores(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<UserFilterParams>,
) -> AppResult<Json<DataResponse<Vec<Score>>>> {
    let user_id = params.user_id.unwrap_or(auth.user_id);
    if !auth.owns_or_admin(user_id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "You can only list your own scores".into(),
        )));
    }
    let scores = ScoreRepo::list_for_user(&state.pool, user_id).await?;
    Ok(Json(DataResponse { data: scores }))
}

/// GET /api/v1/scores/{id}
pub async fn get_score(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Score>>> {
    let score = visible_score(&state.pool, &auth, id).await?;
    Ok(Json(DataResponse { data: score }))
}

/// DELETE /api/v1/scores/{id}
pub async fn delete_score(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    visible_score(&state.pool, &auth, id).await?;
    ScoreRepo::delete(&state.pool, id).await?;
    tracing::info!(user_id = auth.user_id, score_id = id, "Score deleted");
    Ok(StatusCode::NO_CONTENT)
}
