//! Handlers for the `/reports` resource.
//!
//! Filing a report pulls both referenced entities out of circulation by
//! marking them `reported`. Resolution goes through the approval engine.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use quizbank_core::approval::ContentKind;
use quizbank_core::error::CoreError;
use quizbank_core::status::{ContentStatus, StatusId};
use quizbank_core::types::DbId;
use quizbank_db::models::report::{CreateReport, ReportDetail, ReportFilter};
use quizbank_db::repositories::{KeywordRepo, QuizRepo, ReportRepo};
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAuth, RequireSuperAdmin};
use crate::query::ReportListParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Current status id of a referenced quiz or keyword set, or 404.
async fn referenced_status(pool: &PgPool, kind: ContentKind, id: DbId) -> AppResult<StatusId> {
    let status_id = match kind {
        ContentKind::Quiz => QuizRepo::find_by_id(pool, id).await?.map(|q| q.status_id),
        ContentKind::Keyword => KeywordRepo::find_by_id(pool, id).await?.map(|k| k.status_id),
    };
    status_id.ok_or(AppError::Core(CoreError::NotFound {
        entity: kind.entity_name(),
        id,
    }))
}

fn already_reported(kind: ContentKind, id: DbId) -> AppError {
    AppError::Core(CoreError::Conflict(format!(
        "{} {id} is already part of an open report",
        kind.entity_name()
    )))
}

/// POST /api/v1/reports
pub async fn create_report(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateReport>,
) -> AppResult<impl IntoResponse> {
    if input.original_id == input.suggested_id {
        return Err(AppError::BadRequest(
            "Original and suggested entities must be different".into(),
        ));
    }

    let kind = input.report_type;
    for id in [input.original_id, input.suggested_id] {
        if referenced_status(&state.pool, kind, id).await? == ContentStatus::Reported.id() {
            return Err(already_reported(kind, id));
        }
    }

    // A concurrent report can still claim either entity first.
    let report = ReportRepo::create(&state.pool, auth.user_id, &input)
        .await?
        .ok_or_else(|| already_reported(kind, input.original_id))?;

    tracing::info!(
        user_id = auth.user_id,
        report_id = report.id,
        report_type = kind.as_str(),
        original_id = input.original_id,
        suggested_id = input.suggested_id,
        "Report filed"
    );

    let detail = ReportRepo::populate(&state.pool, report).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: detail })))
}

/// GET /api/v1/reports?type=&user_id=
pub async fn list_reports(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<ReportListParams>,
) -> AppResult<Json<DataResponse<Vec<ReportDetail>>>> {
    let filter = ReportFilter {
        report_type: params.report_type()?,
        user_id: params.user_id,
    };
    let reports = ReportRepo::list_details(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: reports }))
}

/// GET /api/v1/reports/{id}
pub async fn get_report(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ReportDetail>>> {
    let report = ReportRepo::find_detail(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Report",
            id,
        }))?;
    Ok(Json(DataResponse { data: report }))
}

/// DELETE /api/v1/reports/{id}
pub async fn delete_report(
    RequireSuperAdmin(user): RequireSuperAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !ReportRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Report",
            id,
        }));
    }
    tracing::info!(user_id = user.user_id, report_id = id, "Report deleted");
    Ok(StatusCode::NO_CONTENT)
}
