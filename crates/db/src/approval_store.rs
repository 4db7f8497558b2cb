//! PostgreSQL implementation of the approval engine's store.

use async_trait::async_trait;
use serde::Serialize;
use sqlx::{PgPool, Postgres, Transaction};
use quizbank_core::approval::{
    ApprovalStore, CastVote, ContentKind, ResolutionPlan, TargetKind, TargetRef, TargetState,
    TargetStatus,
};
use quizbank_core::error::CoreError;
use quizbank_core::status::{ContentStatus, ReportStatus, StatusId};
use quizbank_core::types::DbId;

use crate::models::keyword::Keyword;
use crate::models::quiz::Quiz;
use crate::models::report::ReportDetail;
use crate::models::vote::Vote;
use crate::repositories::report_repo::content_table;
use crate::repositories::{KeywordRepo, QuizRepo, ReportRepo, VoteRepo};

/// Updated target returned after a terminal transition.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum TargetView {
    Quiz(Quiz),
    Keyword(Keyword),
    Report(ReportDetail),
}

/// Content store and vote ledger backed by the application pool.
#[derive(Clone)]
pub struct PgApprovalStore {
    pool: PgPool,
}

impl PgApprovalStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn target_table(kind: TargetKind) -> &'static str {
    match kind {
        TargetKind::Quiz => content_table(ContentKind::Quiz),
        TargetKind::Keyword => content_table(ContentKind::Keyword),
        TargetKind::Report => "reports",
    }
}

fn pending_status_id(kind: TargetKind) -> StatusId {
    match kind {
        TargetKind::Quiz | TargetKind::Keyword => ContentStatus::Pending.id(),
        TargetKind::Report => ReportStatus::Pending.id(),
    }
}

fn storage_error(err: sqlx::Error) -> CoreError {
    tracing::error!(error = %err, "Approval store query failed");
    CoreError::Internal(format!("Database error: {err}"))
}

fn unknown_status(target: TargetRef, id: StatusId) -> CoreError {
    CoreError::Internal(format!("{target} has unknown status id {id}"))
}

fn cast_vote(vote: Vote) -> CastVote {
    CastVote {
        admin_id: vote.admin_id,
        approved: vote.approved,
    }
}

impl PgApprovalStore {
    /// Lock the target row and check it is still pending.
    ///
    /// Both voting and finalizing go through this lock, so a vote either
    /// lands before the resolution (and is cleared by it) or sees the
    /// terminal status and writes nothing.
    async fn lock_pending(
        tx: &mut Transaction<'_, Postgres>,
        target: TargetRef,
    ) -> Result<bool, sqlx::Error> {
        let lock = format!(
            "SELECT status_id FROM {} WHERE id = $1 FOR UPDATE",
            target_table(target.kind)
        );
        let current: Option<StatusId> = sqlx::query_scalar(&lock)
            .bind(target.id)
            .fetch_optional(&mut **tx)
            .await?;
        Ok(current == Some(pending_status_id(target.kind)))
    }

    async fn vote_while_pending(
        &self,
        target: TargetRef,
        admin_id: DbId,
        approved: bool,
    ) -> Result<Option<Vec<CastVote>>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        if !Self::lock_pending(&mut tx, target).await? {
            tx.rollback().await?;
            return Ok(None);
        }

        VoteRepo::upsert(&mut tx, target, admin_id, approved).await?;
        let votes = VoteRepo::list_for_target_in_tx(&mut tx, target).await?;

        tx.commit().await?;
        Ok(Some(votes.into_iter().map(cast_vote).collect()))
    }

    async fn content_state(&self, target: TargetRef) -> Result<Option<TargetState>, CoreError> {
        let query = format!(
            "SELECT status_id FROM {} WHERE id = $1",
            target_table(target.kind)
        );
        let status_id: Option<StatusId> = sqlx::query_scalar(&query)
            .bind(target.id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?;

        status_id
            .map(|id| {
                ContentStatus::from_id(id)
                    .map(|status| TargetState {
                        status: TargetStatus::Content(status),
                        links: None,
                    })
                    .ok_or_else(|| unknown_status(target, id))
            })
            .transpose()
    }

    async fn report_state(&self, target: TargetRef) -> Result<Option<TargetState>, CoreError> {
        let Some(report) = ReportRepo::find_by_id(&self.pool, target.id)
            .await
            .map_err(storage_error)?
        else {
            return Ok(None);
        };
        let status = report
            .status()
            .ok_or_else(|| unknown_status(target, report.status_id))?;
        Ok(Some(TargetState {
            status: TargetStatus::Report(status),
            links: report.links(),
        }))
    }

    async fn apply_plan(&self, plan: &ResolutionPlan) -> Result<bool, sqlx::Error> {
        let target = plan.target;
        let table = target_table(target.kind);
        let mut tx = self.pool.begin().await?;

        if !Self::lock_pending(&mut tx, target).await? {
            tx.rollback().await?;
            return Ok(false);
        }

        for change in &plan.cascade {
            let query = format!(
                "UPDATE {} SET status_id = $2 WHERE id = $1",
                content_table(change.kind)
            );
            sqlx::query(&query)
                .bind(change.id)
                .bind(change.status.id())
                .execute(&mut *tx)
                .await?;
        }

        match target.kind {
            TargetKind::Report => {
                sqlx::query(
                    "UPDATE reports SET status_id = $2, reason = COALESCE($3, reason)
                     WHERE id = $1",
                )
                .bind(target.id)
                .bind(plan.report_status().id())
                .bind(&plan.reason)
                .execute(&mut *tx)
                .await?;
            }
            TargetKind::Quiz | TargetKind::Keyword => {
                let query = format!("UPDATE {table} SET status_id = $2 WHERE id = $1");
                sqlx::query(&query)
                    .bind(target.id)
                    .bind(plan.content_status().id())
                    .execute(&mut *tx)
                    .await?;
            }
        }

        VoteRepo::delete_for_target(&mut tx, target).await?;

        tx.commit().await?;
        Ok(true)
    }
}

#[async_trait]
impl ApprovalStore for PgApprovalStore {
    type View = TargetView;

    async fn load_target(&self, target: TargetRef) -> Result<Option<TargetState>, CoreError> {
        match target.kind {
            TargetKind::Quiz | TargetKind::Keyword => self.content_state(target).await,
            TargetKind::Report => self.report_state(target).await,
        }
    }

    async fn record_vote(
        &self,
        target: TargetRef,
        admin_id: DbId,
        approved: bool,
    ) -> Result<Option<Vec<CastVote>>, CoreError> {
        self.vote_while_pending(target, admin_id, approved)
            .await
            .map_err(storage_error)
    }

    async fn list_votes(&self, target: TargetRef) -> Result<Vec<CastVote>, CoreError> {
        let votes = VoteRepo::list_for_target(&self.pool, target)
            .await
            .map_err(storage_error)?;
        Ok(votes.into_iter().map(cast_vote).collect())
    }

    async fn commit_resolution(&self, plan: &ResolutionPlan) -> Result<bool, CoreError> {
        self.apply_plan(plan).await.map_err(storage_error)
    }

    async fn load_view(&self, target: TargetRef) -> Result<Option<TargetView>, CoreError> {
        let view = match target.kind {
            TargetKind::Quiz => QuizRepo::find_by_id(&self.pool, target.id)
                .await
                .map_err(storage_error)?
                .map(TargetView::Quiz),
            TargetKind::Keyword => KeywordRepo::find_by_id(&self.pool, target.id)
                .await
                .map_err(storage_error)?
                .map(TargetView::Keyword),
            TargetKind::Report => ReportRepo::find_detail(&self.pool, target.id)
                .await
                .map_err(storage_error)?
                .map(TargetView::Report),
        };
        Ok(view)
    }
}
