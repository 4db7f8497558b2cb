//! Repository for the `votes` ledger.
//!
//! Only the approval workflow writes here.

use sqlx::{PgPool, Postgres, Transaction};
use quizbank_core::approval::{ContentKind, TargetRef};
use quizbank_core::types::DbId;

use crate::models::vote::Vote;
use crate::repositories::report_repo::pair_columns;

const COLUMNS: &str = "id, admin_id, target_kind, target_id, approved, created_at, updated_at";

/// Provides ledger operations for admin votes.
pub struct VoteRepo;

impl VoteRepo {
    /// Insert this admin's vote on `target`, or overwrite the existing one,
    /// inside an open transaction.
    pub async fn upsert(
        tx: &mut Transaction<'_, Postgres>,
        target: TargetRef,
        admin_id: DbId,
        approved: bool,
    ) -> Result<Vote, sqlx::Error> {
        let query = format!(
            "INSERT INTO votes (admin_id, target_kind, target_id, approved)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT ON CONSTRAINT uq_votes_admin_target
             DO UPDATE SET approved = EXCLUDED.approved
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Vote>(&query)
            .bind(admin_id)
            .bind(target.kind.as_str())
            .bind(target.id)
            .bind(approved)
            .fetch_one(&mut **tx)
            .await
    }

    /// Ballot for `target` as seen by an open transaction.
    pub async fn list_for_target_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        target: TargetRef,
    ) -> Result<Vec<Vote>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM votes
             WHERE target_kind = $1 AND target_id = $2
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, Vote>(&query)
            .bind(target.kind.as_str())
            .bind(target.id)
            .fetch_all(&mut **tx)
            .await
    }

    /// Live ballot for `target`, oldest vote first.
    pub async fn list_for_target(
        pool: &PgPool,
        target: TargetRef,
    ) -> Result<Vec<Vote>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM votes
             WHERE target_kind = $1 AND target_id = $2
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, Vote>(&query)
            .bind(target.kind.as_str())
            .bind(target.id)
            .fetch_all(pool)
            .await
    }

    /// Clear the ballot for `target` inside an open transaction.
    pub async fn delete_for_target(
        tx: &mut Transaction<'_, Postgres>,
        target: TargetRef,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM votes WHERE target_kind = $1 AND target_id = $2")
            .bind(target.kind.as_str())
            .bind(target.id)
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected())
    }

    /// Clear ballots of every report that references the given quiz or
    /// keyword set, ahead of the cascade that deletes those reports.
    pub async fn delete_for_reports_referencing(
        tx: &mut Transaction<'_, Postgres>,
        kind: ContentKind,
        id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let (original, suggested) = pair_columns(kind);
        let query = format!(
            "DELETE FROM votes
             WHERE target_kind = 'report'
               AND target_id IN (
                   SELECT id FROM reports WHERE {original} = $1 OR {suggested} = $1
               )"
        );
        let result = sqlx::query(&query)
            .bind(id)
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected())
    }
}
