//! Handlers for the `/categories` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use quizbank_core::content::validate_category;
use quizbank_core::error::CoreError;
use quizbank_core::types::DbId;
use quizbank_db::models::category::{Category, CreateCategory, UpdateCategory};
use quizbank_db::repositories::CategoryRepo;
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::handlers::subject::ensure_subject_exists;
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::query::SubjectFilterParams;
use crate::response::DataResponse;
use crate::state::AppState;

pub async fn ensure_category_exists(pool: &PgPool, id: DbId) -> AppResult<Category> {
    CategoryRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))
}

/// Check that `category_id` exists and belongs to `subject_id`.
pub async fn ensure_category_in_subject(
    pool: &PgPool,
    subject_id: DbId,
    category_id: DbId,
) -> AppResult<()> {
    ensure_subject_exists(pool, subject_id).await?;
    let category = ensure_category_exists(pool, category_id).await?;
    if category.subject_id != subject_id {
        return Err(AppError::BadRequest(format!(
            "Category {category_id} does not belong to subject {subject_id}"
        )));
    }
    Ok(())
}

/// GET /api/v1/categories?subject_id=
pub async fn list_categories(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<SubjectFilterParams>,
) -> AppResult<Json<DataResponse<Vec<Category>>>> {
    let categories = CategoryRepo::list(&state.pool, params.subject_id).await?;
    Ok(Json(DataResponse { data: categories }))
}

/// GET /api/v1/categories/{id}
pub async fn get_category(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Category>>> {
    let category = ensure_category_exists(&state.pool, id).await?;
    Ok(Json(DataResponse { data: category }))
}

/// POST /api/v1/categories
pub async fn create_category(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateCategory>,
) -> AppResult<impl IntoResponse> {
    validate_category(&input.name, &input.description)?;
    ensure_subject_exists(&state.pool, input.subject_id).await?;

    let category = CategoryRepo::create(&state.pool, &input).await?;
    tracing::info!(
        user_id = user.user_id,
        category_id = category.id,
        subject_id = input.subject_id,
        "Category created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: category })))
}

/// PUT /api/v1/categories/{id}
pub async fn update_category(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCategory>,
) -> AppResult<Json<DataResponse<Category>>> {
    let existing = ensure_category_exists(&state.pool, id).await?;
    validate_category(
        input.name.as_deref().unwrap_or(&existing.name),
        input.description.as_deref().unwrap_or(&existing.description),
    )?;

    let category = CategoryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))?;
    tracing::info!(user_id = user.user_id, category_id = id, "Category updated");

    Ok(Json(DataResponse { data: category }))
}

/// DELETE /api/v1/categories/{id}
pub async fn delete_category(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !CategoryRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }));
    }
    tracing::info!(user_id = user.user_id, category_id = id, "Category deleted");
    Ok(StatusCode::NO_CONTENT)
}
