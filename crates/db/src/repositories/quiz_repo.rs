//! Repository for the `quizzes` table.

use sqlx::PgPool;
use quizbank_core::approval::{ContentKind, TargetRef};
use quizbank_core::status::ContentStatus;
use quizbank_core::types::DbId;

use crate::models::quiz::{CreateQuiz, Quiz, QuizFilter, UpdateQuiz};
use crate::repositories::{ReportRepo, VoteRepo};

const COLUMNS: &str = "id, question, question_type, choices, correct_answers, explanation, \
                       images, subject_id, category_id, created_by, status_id, \
                       created_at, updated_at";

/// Provides CRUD operations for quizzes.
pub struct QuizRepo;

impl QuizRepo {
    /// Insert a new quiz with the given initial status.
    pub async fn create(
        pool: &PgPool,
        input: &CreateQuiz,
        created_by: DbId,
        status: ContentStatus,
    ) -> Result<Quiz, sqlx::Error> {
        let query = format!(
            "INSERT INTO quizzes
                (question, question_type, choices, correct_answers, explanation,
                 images, subject_id, category_id, created_by, status_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Quiz>(&query)
            .bind(input.question.trim())
            .bind(input.question_type.as_str())
            .bind(&input.choices)
            .bind(&input.correct_answers)
            .bind(&input.explanation)
            .bind(&input.images)
            .bind(input.subject_id)
            .bind(input.category_id)
            .bind(created_by)
            .bind(status.id())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Quiz>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM quizzes WHERE id = $1");
        sqlx::query_as::<_, Quiz>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List quizzes matching every set filter, newest first.
    pub async fn list(pool: &PgPool, filter: &QuizFilter) -> Result<Vec<Quiz>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM quizzes
             WHERE ($1::BIGINT IS NULL OR subject_id = $1)
               AND ($2::BIGINT IS NULL OR category_id = $2)
               AND ($3::SMALLINT IS NULL OR status_id = $3)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Quiz>(&query)
            .bind(filter.subject_id)
            .bind(filter.category_id)
            .bind(filter.status.map(ContentStatus::id))
            .fetch_all(pool)
            .await
    }

    /// Apply a content patch and optionally move the quiz to `status`.
    ///
    /// Returns `None` if no row with the given `id` exists or the quiz is
    /// held by an open report.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateQuiz,
        status: Option<ContentStatus>,
    ) -> Result<Option<Quiz>, sqlx::Error> {
        let query = format!(
            "UPDATE quizzes SET
                question = COALESCE($2, question),
                question_type = COALESCE($3, question_type),
                choices = COALESCE($4, choices),
                correct_answers = COALESCE($5, correct_answers),
                explanation = COALESCE($6, explanation),
                images = COALESCE($7, images),
                status_id = COALESCE($8, status_id)
             WHERE id = $1 AND status_id <> $9
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Quiz>(&query)
            .bind(id)
            .bind(input.question.as_deref().map(str::trim))
            .bind(input.question_type.map(|t| t.as_str()))
            .bind(&input.choices)
            .bind(&input.correct_answers)
            .bind(&input.explanation)
            .bind(&input.images)
            .bind(status.map(ContentStatus::id))
            .bind(ContentStatus::Reported.id())
            .fetch_optional(pool)
            .await
    }

    /// Delete a quiz together with its ballot and the ballots of reports
    /// that reference it.
    ///
    /// Those reports are removed by the foreign-key cascade; the other quiz
    /// of any pending one is released first.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        ReportRepo::release_referencing(&mut tx, ContentKind::Quiz, id).await?;
        VoteRepo::delete_for_target(&mut tx, TargetRef::quiz(id)).await?;
        VoteRepo::delete_for_reports_referencing(&mut tx, ContentKind::Quiz, id).await?;

        let result = sqlx::query("DELETE FROM quizzes WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
