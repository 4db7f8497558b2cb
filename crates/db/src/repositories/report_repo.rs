//! Repository for the `reports` table.

use sqlx::{PgPool, Postgres, Transaction};
use quizbank_core::approval::{ContentKind, TargetRef};
use quizbank_core::status::{ContentStatus, ReportStatus};
use quizbank_core::types::DbId;

use crate::models::report::{CreateReport, Report, ReportDetail, ReportFilter, ReportedEntity};
use crate::repositories::{KeywordRepo, QuizRepo, VoteRepo};

const COLUMNS: &str = "id, report_type, original_quiz_id, suggested_quiz_id, \
                       original_keyword_id, suggested_keyword_id, user_id, reason, \
                       status_id, created_at, updated_at";

/// Content table holding entities of `kind`.
pub(crate) fn content_table(kind: ContentKind) -> &'static str {
    match kind {
        ContentKind::Quiz => "quizzes",
        ContentKind::Keyword => "keywords",
    }
}

/// `(original, suggested)` id columns of a report of `kind`.
pub(crate) fn pair_columns(kind: ContentKind) -> (&'static str, &'static str) {
    match kind {
        ContentKind::Quiz => ("original_quiz_id", "suggested_quiz_id"),
        ContentKind::Keyword => ("original_keyword_id", "suggested_keyword_id"),
    }
}

/// Provides CRUD operations for correction reports.
pub struct ReportRepo;

impl ReportRepo {
    /// File a report and mark both referenced entities `reported`, as one
    /// transaction.
    ///
    /// Returns `None` (and changes nothing) if either entity is missing or
    /// already reported by the time the transaction runs.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateReport,
    ) -> Result<Option<Report>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let mark = format!(
            "UPDATE {} SET status_id = $2 WHERE id = ANY($1) AND status_id <> $2",
            content_table(input.report_type)
        );
        let marked = sqlx::query(&mark)
            .bind(vec![input.original_id, input.suggested_id])
            .bind(ContentStatus::Reported.id())
            .execute(&mut *tx)
            .await?
            .rows_affected();
        if marked != 2 {
            tx.rollback().await?;
            return Ok(None);
        }

        let (quiz_pair, keyword_pair) = match input.report_type {
            ContentKind::Quiz => ((Some(input.original_id), Some(input.suggested_id)), (None, None)),
            ContentKind::Keyword => ((None, None), (Some(input.original_id), Some(input.suggested_id))),
        };
        let insert = format!(
            "INSERT INTO reports
                (report_type, original_quiz_id, suggested_quiz_id,
                 original_keyword_id, suggested_keyword_id, user_id, reason)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        let report = sqlx::query_as::<_, Report>(&insert)
            .bind(input.report_type.as_str())
            .bind(quiz_pair.0)
            .bind(quiz_pair.1)
            .bind(keyword_pair.0)
            .bind(keyword_pair.1)
            .bind(user_id)
            .bind(&input.reason)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(report))
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Report>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reports WHERE id = $1");
        sqlx::query_as::<_, Report>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List reports matching every set filter, newest first.
    pub async fn list(pool: &PgPool, filter: &ReportFilter) -> Result<Vec<Report>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reports
             WHERE ($1::TEXT IS NULL OR report_type = $1)
               AND ($2::BIGINT IS NULL OR user_id = $2)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Report>(&query)
            .bind(filter.report_type.map(ContentKind::as_str))
            .bind(filter.user_id)
            .fetch_all(pool)
            .await
    }

    /// Load the original and suggested entities of `report`.
    pub async fn populate(pool: &PgPool, report: Report) -> Result<ReportDetail, sqlx::Error> {
        let (original, suggested) = match report.links() {
            Some(links) => (
                Self::load_entity(pool, links.kind, links.original_id).await?,
                Self::load_entity(pool, links.kind, links.suggested_id).await?,
            ),
            None => (None, None),
        };
        Ok(ReportDetail {
            report,
            original,
            suggested,
        })
    }

    pub async fn find_detail(pool: &PgPool, id: DbId) -> Result<Option<ReportDetail>, sqlx::Error> {
        match Self::find_by_id(pool, id).await? {
            Some(report) => Ok(Some(Self::populate(pool, report).await?)),
            None => Ok(None),
        }
    }

    pub async fn list_details(
        pool: &PgPool,
        filter: &ReportFilter,
    ) -> Result<Vec<ReportDetail>, sqlx::Error> {
        let reports = Self::list(pool, filter).await?;
        let mut details = Vec::with_capacity(reports.len());
        for report in reports {
            details.push(Self::populate(pool, report).await?);
        }
        Ok(details)
    }

    /// Delete a report and its ballot.
    ///
    /// If the report is still pending, its entities are released in the same
    /// transaction: the original goes back to `approved` and the suggestion
    /// back to `pending`.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!("SELECT {COLUMNS} FROM reports WHERE id = $1 FOR UPDATE");
        let Some(report) = sqlx::query_as::<_, Report>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            tx.rollback().await?;
            return Ok(false);
        };

        if report.status() == Some(ReportStatus::Pending) {
            if let Some(links) = report.links() {
                let (original, suggested) = (Some(links.original_id), Some(links.suggested_id));
                Self::release(&mut tx, links.kind, original, suggested).await?;
            }
        }

        VoteRepo::delete_for_target(&mut tx, TargetRef::report(id)).await?;
        sqlx::query("DELETE FROM reports WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }

    /// Release the counterparts of every pending report that references the
    /// quiz or keyword set `id`, ahead of the cascade that deletes those
    /// reports.
    pub async fn release_referencing(
        tx: &mut Transaction<'_, Postgres>,
        kind: ContentKind,
        id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let (original, suggested) = pair_columns(kind);
        let query = format!(
            "SELECT {COLUMNS} FROM reports
             WHERE ({original} = $1 OR {suggested} = $1) AND status_id = $2
             FOR UPDATE"
        );
        let reports = sqlx::query_as::<_, Report>(&query)
            .bind(id)
            .bind(ReportStatus::Pending.id())
            .fetch_all(&mut **tx)
            .await?;

        let mut released = 0;
        for links in reports.iter().filter_map(Report::links) {
            let original = (links.original_id != id).then_some(links.original_id);
            let suggested = (links.suggested_id != id).then_some(links.suggested_id);
            released += Self::release(tx, kind, original, suggested).await?;
        }
        Ok(released)
    }

    /// Move still-`reported` entities out of a dropped report: the original
    /// to `approved`, the suggestion to `pending`.
    async fn release(
        tx: &mut Transaction<'_, Postgres>,
        kind: ContentKind,
        original_id: Option<DbId>,
        suggested_id: Option<DbId>,
    ) -> Result<u64, sqlx::Error> {
        let query = format!(
            "UPDATE {} SET status_id = $2 WHERE id = $1 AND status_id = $3",
            content_table(kind)
        );
        let mut released = 0;
        for (id, status) in [
            (original_id, ContentStatus::Approved),
            (suggested_id, ContentStatus::Pending),
        ] {
            let Some(id) = id else { continue };
            released += sqlx::query(&query)
                .bind(id)
                .bind(status.id())
                .bind(ContentStatus::Reported.id())
                .execute(&mut **tx)
                .await?
                .rows_affected();
        }
        Ok(released)
    }

    async fn load_entity(
        pool: &PgPool,
        kind: ContentKind,
        id: DbId,
    ) -> Result<Option<ReportedEntity>, sqlx::Error> {
        Ok(match kind {
            ContentKind::Quiz => QuizRepo::find_by_id(pool, id)
                .await?
                .map(ReportedEntity::Quiz),
            ContentKind::Keyword => KeywordRepo::find_by_id(pool, id)
                .await?
                .map(ReportedEntity::Keyword),
        })
    }
}
