//! Repository for the `keywords` table.

use sqlx::PgPool;
use quizbank_core::approval::{ContentKind, TargetRef};
use quizbank_core::status::ContentStatus;
use quizbank_core::types::DbId;

use crate::models::keyword::{CreateKeyword, Keyword, KeywordFilter, UpdateKeyword};
use crate::repositories::{ReportRepo, VoteRepo};

const COLUMNS: &str = "id, name, keywords, is_global, subject_id, category_id, created_by, \
                       status_id, created_at, updated_at";

/// Provides CRUD operations for keyword sets.
pub struct KeywordRepo;

impl KeywordRepo {
    /// Insert a keyword set. Global sets are stored without subject/category.
    pub async fn create(
        pool: &PgPool,
        input: &CreateKeyword,
        created_by: DbId,
        status: ContentStatus,
    ) -> Result<Keyword, sqlx::Error> {
        let (subject_id, category_id) = if input.is_global {
            (None, None)
        } else {
            (input.subject_id, input.category_id)
        };
        let query = format!(
            "INSERT INTO keywords
                (name, keywords, is_global, subject_id, category_id, created_by, status_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Keyword>(&query)
            .bind(input.name.trim())
            .bind(&input.keywords)
            .bind(input.is_global)
            .bind(subject_id)
            .bind(category_id)
            .bind(created_by)
            .bind(status.id())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Keyword>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM keywords WHERE id = $1");
        sqlx::query_as::<_, Keyword>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List keyword sets matching every set filter, newest first.
    pub async fn list(
        pool: &PgPool,
        filter: &KeywordFilter,
    ) -> Result<Vec<Keyword>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM keywords
             WHERE ($1::BIGINT IS NULL OR subject_id = $1)
               AND ($2::BIGINT IS NULL OR category_id = $2)
               AND ($3::SMALLINT IS NULL OR status_id = $3)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Keyword>(&query)
            .bind(filter.subject_id)
            .bind(filter.category_id)
            .bind(filter.status.map(ContentStatus::id))
            .fetch_all(pool)
            .await
    }

    /// Same contract as [`QuizRepo::update`](super::QuizRepo::update).
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateKeyword,
        status: Option<ContentStatus>,
    ) -> Result<Option<Keyword>, sqlx::Error> {
        let query = format!(
            "UPDATE keywords SET
                name = COALESCE($2, name),
                keywords = COALESCE($3, keywords),
                status_id = COALESCE($4, status_id)
             WHERE id = $1 AND status_id <> $5
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Keyword>(&query)
            .bind(id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(&input.keywords)
            .bind(status.map(ContentStatus::id))
            .bind(ContentStatus::Reported.id())
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        ReportRepo::release_referencing(&mut tx, ContentKind::Keyword, id).await?;
        VoteRepo::delete_for_target(&mut tx, TargetRef::keyword(id)).await?;
        VoteRepo::delete_for_reports_referencing(&mut tx, ContentKind::Keyword, id).await?;

        let result = sqlx::query("DELETE FROM keywords WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
