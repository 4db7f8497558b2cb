//! Admin decisions on pending quizzes, keyword sets and reports.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use quizbank_core::approval::{
    tally, Actor, ApprovalStore, CastVote, DecisionReport, TargetKind, TargetRef, VoteTally,
};
use quizbank_core::error::CoreError;
use quizbank_core::types::DbId;
use quizbank_db::approval_store::TargetView;
use quizbank_db::models::vote::Vote;
use quizbank_db::repositories::VoteRepo;
use serde::Serialize;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

fn parse_kind(kind: &str) -> AppResult<TargetKind> {
    TargetKind::parse(kind).ok_or_else(|| {
        AppError::BadRequest(format!(
            "Invalid target type '{kind}'. Must be one of: quiz, keyword, report"
        ))
    })
}

/// POST /api/v1/approvals/{kind}/{id}
///
/// Body: `{ "approved": bool, "reason": string? }`. Role and payload checks
/// happen inside the engine so every caller gets the same error ordering.
pub async fn decide(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, DbId)>,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<DataResponse<DecisionReport<TargetView>>>> {
    let target = TargetRef::new(parse_kind(&kind)?, id);
    let actor = Actor {
        id: auth.user_id,
        role: auth.role,
    };
    let payload = match body {
        Ok(Json(payload)) => payload,
        Err(rejection) => {
            actor.ensure_can_decide(target.kind)?;
            return Err(AppError::BadRequest(rejection.body_text()));
        }
    };

    let report = state.approvals.decide(actor, target, &payload).await?;

    tracing::info!(
        admin_id = auth.user_id,
        role = %auth.role,
        target = %target,
        outcome = ?report.outcome,
        approvals = report.tally.approvals,
        denials = report.tally.denials,
        "Approval decision recorded"
    );

    Ok(Json(DataResponse { data: report }))
}

#[derive(Debug, Serialize)]
pub struct Ballot {
    pub target: TargetRef,
    pub status: &'static str,
    pub votes: Vec<Vote>,
    pub tally: VoteTally,
}

/// GET /api/v1/approvals/{kind}/{id}/votes
pub async fn list_votes(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, DbId)>,
) -> AppResult<Json<DataResponse<Ballot>>> {
    let target = TargetRef::new(parse_kind(&kind)?, id);

    let current = state
        .approvals
        .store()
        .load_target(target)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: target.kind.entity_name(),
            id,
        }))?;

    let votes = VoteRepo::list_for_target(&state.pool, target).await?;
    let cast: Vec<CastVote> = votes
        .iter()
        .map(|v| CastVote {
            admin_id: v.admin_id,
            approved: v.approved,
        })
        .collect();

    Ok(Json(DataResponse {
        data: Ballot {
            target,
            status: current.status.as_str(),
            tally: tally(&cast),
            votes,
        },
    }))
}
