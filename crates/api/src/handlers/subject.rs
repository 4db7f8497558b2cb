//! Handlers for the `/subjects` resource.
//!
//! Anyone signed in can read; only super admins change subjects.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use quizbank_core::content::validate_subject;
use quizbank_core::error::CoreError;
use quizbank_core::types::DbId;
use quizbank_db::models::subject::{CreateSubject, Subject, UpdateSubject};
use quizbank_db::repositories::SubjectRepo;
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAuth, RequireSuperAdmin};
use crate::response::DataResponse;
use crate::state::AppState;

/// Load a subject or fail with 404.
pub async fn ensure_subject_exists(pool: &PgPool, id: DbId) -> AppResult<Subject> {
    SubjectRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Subject",
            id,
        }))
}

/// GET /api/v1/subjects
pub async fn list_subjects(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Subject>>>> {
    let subjects = SubjectRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: subjects }))
}

/// GET /api/v1/subjects/{id}
pub async fn get_subject(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Subject>>> {
    let subject = ensure_subject_exists(&state.pool, id).await?;
    Ok(Json(DataResponse { data: subject }))
}

/// POST /api/v1/subjects
pub async fn create_subject(
    RequireSuperAdmin(user): RequireSuperAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateSubject>,
) -> AppResult<impl IntoResponse> {
    validate_subject(
        &input.name,
        &input.description,
        input.year,
        input.image.as_deref(),
    )?;

    let subject = SubjectRepo::create(&state.pool, &input).await?;
    tracing::info!(user_id = user.user_id, subject_id = subject.id, "Subject created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: subject })))
}

/// PUT /api/v1/subjects/{id}
pub async fn update_subject(
    RequireSuperAdmin(user): RequireSuperAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSubject>,
) -> AppResult<Json<DataResponse<Subject>>> {
    let existing = ensure_subject_exists(&state.pool, id).await?;
    validate_subject(
        input.name.as_deref().unwrap_or(&existing.name),
        input.description.as_deref().unwrap_or(&existing.description),
        input.year.unwrap_or(existing.year),
        input.image.as_deref().or(existing.image.as_deref()),
    )?;

    let subject = SubjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Subject",
            id,
        }))?;
    tracing::info!(user_id = user.user_id, subject_id = id, "Subject updated");

    Ok(Json(DataResponse { data: subject }))
}

/// DELETE /api/v1/subjects/{id}
///
/// Cascades to the subject's categories, quizzes and keyword sets.
pub async fn delete_subject(
    RequireSuperAdmin(user): RequireSuperAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !SubjectRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Subject",
            id,
        }));
    }
    tracing::info!(user_id = user.user_id, subject_id = id, "Subject deleted");
    Ok(StatusCode::NO_CONTENT)
}
