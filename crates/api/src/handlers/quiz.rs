//! Handlers for the `/quizzes` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use quizbank_core::content::{validate_quiz, QuestionType};
use quizbank_core::error::CoreError;
use quizbank_core::status::ContentStatus;
use quizbank_core::types::DbId;
use quizbank_db::models::quiz::{CreateQuiz, Quiz, QuizFilter, UpdateQuiz};
use quizbank_db::repositories::QuizRepo;
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::handlers::category::ensure_category_in_subject;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::query::ContentListParams;
use crate::response::DataResponse;
use crate::state::AppState;

pub async fn ensure_quiz_exists(pool: &PgPool, id: DbId) -> AppResult<Quiz> {
    QuizRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Quiz", id }))
}

/// Content created by a super admin skips the review queue.
pub(crate) fn initial_status(user: &AuthUser) -> ContentStatus {
    if user.role.is_super_admin() {
        ContentStatus::Approved
    } else {
        ContentStatus::Pending
    }
}

/// POST /api/v1/quizzes
pub async fn create_quiz(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateQuiz>,
) -> AppResult<impl IntoResponse> {
    validate_quiz(
        &input.question,
        input.question_type,
        &input.choices,
        &input.correct_answers,
        &input.images,
    )?;
    ensure_category_in_subject(&state.pool, input.subject_id, input.category_id).await?;

    let status = initial_status(&auth);
    let quiz = QuizRepo::create(&state.pool, &input, auth.user_id, status).await?;

    tracing::info!(
        user_id = auth.user_id,
        quiz_id = quiz.id,
        status = %status,
        "Quiz created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: quiz })))
}

/// GET /api/v1/quizzes?subject_id=&category_id=&status=
pub async fn list_quizzes(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<ContentListParams>,
) -> AppResult<Json<DataResponse<Vec<Quiz>>>> {
    let filter = QuizFilter {
        subject_id: params.subject_id,
        category_id: params.category_id,
        status: params.status()?,
    };
    let quizzes = QuizRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: quizzes }))
}

/// GET /api/v1/quizzes/{id}
pub async fn get_quiz(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Quiz>>> {
    let quiz = ensure_quiz_exists(&state.pool, id).await?;
    Ok(Json(DataResponse { data: quiz }))
}

/// PUT /api/v1/quizzes/{id}
///
/// Owner or admin. A quiz held by an open report cannot be edited, and an
/// edit by anyone but a super admin sends it back to review.
pub async fn update_quiz(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateQuiz>,
) -> AppResult<Json<DataResponse<Quiz>>> {
    let existing = ensure_quiz_exists(&state.pool, id).await?;

    if !auth.owns_or_admin(existing.created_by) {
        return Err(AppError::Core(CoreError::Forbidden(
            "You can only edit your own quizzes".into(),
        )));
    }
    if existing.status() == Some(ContentStatus::Reported) {
        return Err(reported_conflict());
    }

    let question_type = match input.question_type {
        Some(t) => t,
        None => QuestionType::parse(&existing.question_type)?,
    };
    validate_quiz(
        input.question.as_deref().unwrap_or(&existing.question),
        question_type,
        input.choices.as_deref().unwrap_or(existing.choices.as_slice()),
        input
            .correct_answers
            .as_deref()
            .unwrap_or(existing.correct_answers.as_slice()),
        input.images.as_deref().unwrap_or(existing.images.as_slice()),
    )?;

    let status = (!auth.role.is_super_admin()).then_some(ContentStatus::Pending);
    let Some(quiz) = QuizRepo::update(&state.pool, id, &input, status).await? else {
        // Reported (or deleted) since the read above.
        ensure_quiz_exists(&state.pool, id).await?;
        return Err(reported_conflict());
    };

    tracing::info!(user_id = auth.user_id, quiz_id = id, status = quiz.status_id, "Quiz updated");

    Ok(Json(DataResponse { data: quiz }))
}

fn reported_conflict() -> AppError {
    AppError::Core(CoreError::Conflict(
        "Quiz is part of an open report and cannot be edited".into(),
    ))
}

/// DELETE /api/v1/quizzes/{id}
pub async fn delete_quiz(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !QuizRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: "Quiz", id }));
    }
    tracing::info!(user_id = user.user_id, quiz_id = id, "Quiz deleted");
    Ok(StatusCode::NO_CONTENT)
}
