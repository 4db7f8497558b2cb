//! Handlers for the `/keywords` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use quizbank_core::content::validate_keyword;
use quizbank_core::error::CoreError;
use quizbank_core::status::ContentStatus;
use quizbank_core::types::DbId;
use quizbank_db::models::keyword::{CreateKeyword, Keyword, KeywordFilter, UpdateKeyword};
use quizbank_db::repositories::KeywordRepo;
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::handlers::category::ensure_category_in_subject;
use crate::handlers::quiz::initial_status;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAuth, RequireSuperAdmin};
use crate::query::ContentListParams;
use crate::response::DataResponse;
use crate::state::AppState;

pub async fn ensure_keyword_exists(pool: &PgPool, id: DbId) -> AppResult<Keyword> {
    KeywordRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Keyword",
            id,
        }))
}

/// POST /api/v1/keywords
pub async fn create_keyword(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateKeyword>,
) -> AppResult<impl IntoResponse> {
    validate_keyword(
        &input.name,
        &input.keywords,
        input.is_global,
        input.subject_id,
        input.category_id,
    )?;
    if let (false, Some(subject_id), Some(category_id)) =
        (input.is_global, input.subject_id, input.category_id)
    {
        ensure_category_in_subject(&state.pool, subject_id, category_id).await?;
    }

    let status = initial_status(&auth);
    let keyword = KeywordRepo::create(&state.pool, &input, auth.user_id, status).await?;

    tracing::info!(
        user_id = auth.user_id,
        keyword_id = keyword.id,
        is_global = keyword.is_global,
        status = %status,
        "Keyword set created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: keyword })))
}

/// GET /api/v1/keywords?subject_id=&category_id=&status=
pub async fn list_keywords(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<ContentListParams>,
) -> AppResult<Json<DataResponse<Vec<Keyword>>>> {
    let filter = KeywordFilter {
        subject_id: params.subject_id,
        category_id: params.category_id,
        status: params.status()?,
    };
    let keywords = KeywordRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: keywords }))
}

/// GET /api/v1/keywords/{id}
pub async fn get_keyword(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Keyword>>> {
    let keyword = ensure_keyword_exists(&state.pool, id).await?;
    Ok(Json(DataResponse { data: keyword }))
}

/// PUT /api/v1/keywords/{id}
///
/// Same rules as quiz edits.
pub async fn update_keyword(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateKeyword>,
) -> AppResult<Json<DataResponse<Keyword>>> {
    let existing = ensure_keyword_exists(&state.pool, id).await?;

    if !auth.owns_or_admin(existing.created_by) {
        return Err(AppError::Core(CoreError::Forbidden(
            "You can only edit your own keyword sets".into(),
        )));
    }
    if existing.status() == Some(ContentStatus::Reported) {
        return Err(reported_conflict());
    }

    validate_keyword(
        input.name.as_deref().unwrap_or(&existing.name),
        input.keywords.as_deref().unwrap_or(existing.keywords.as_slice()),
        existing.is_global,
        existing.subject_id,
        existing.category_id,
    )?;

    let status = (!auth.role.is_super_admin()).then_some(ContentStatus::Pending);
    let Some(keyword) = KeywordRepo::update(&state.pool, id, &input, status).await? else {
        ensure_keyword_exists(&state.pool, id).await?;
        return Err(reported_conflict());
    };

    tracing::info!(user_id = auth.user_id, keyword_id = id, "Keyword set updated");

    Ok(Json(DataResponse { data: keyword }))
}

fn reported_conflict() -> AppError {
    AppError::Core(CoreError::Conflict(
        "Keyword set is part of an open report and cannot be edited".into(),
    ))
}

/// DELETE /api/v1/keywords/{id}
pub async fn delete_keyword(
    RequireSuperAdmin(user): RequireSuperAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !KeywordRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Keyword",
            id,
        }));
    }
    tracing::info!(user_id = user.user_id, keyword_id = id, "Keyword set deleted");
    Ok(StatusCode::NO_CONTENT)
}
