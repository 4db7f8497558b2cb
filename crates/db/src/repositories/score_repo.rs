//! Repository for the `scores` table.

use sqlx::types::Json;
use sqlx::PgPool;
use quizbank_core::types::DbId;

use crate::models::score::{CreateScore, Score};

const COLUMNS: &str = "id, user_id, subject_id, category_ids, score, full_score, questions, \
                       time_taken_secs, created_at";

/// Provides CRUD operations for quiz attempt scores.
pub struct ScoreRepo;

impl ScoreRepo {
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateScore,
    ) -> Result<Score, sqlx::Error> {
        let query = format!(
            "INSERT INTO scores
                (user_id, subject_id, category_ids, score, full_score, questions, time_taken_secs)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Score>(&query)
            .bind(user_id)
            .bind(input.subject_id)
            .bind(&input.category_ids)
            .bind(input.score)
            .bind(input.full_score)
            .bind(Json(&input.questions))
            .bind(input.time_taken_secs)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Score>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM scores WHERE id = $1");
        sqlx::query_as::<_, Score>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// A user's attempts, newest first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Score>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM scores WHERE user_id = $1 ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Score>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM scores WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
