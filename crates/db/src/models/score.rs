//! Quiz attempt scores.

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use quizbank_core::types::{DbId, Timestamp};

/// One answered question inside an attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnsweredQuestion {
    pub quiz_id: DbId,
    pub answer: String,
    pub is_correct: bool,
}

/// A row from the `scores` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Score {
    pub id: DbId,
    pub user_id: DbId,
    pub subject_id: DbId,
    pub category_ids: Vec<DbId>,
    pub score: i32,
    pub full_score: i32,
    pub questions: Json<Vec<AnsweredQuestion>>,
    pub time_taken_secs: i32,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateScore {
    pub subject_id: DbId,
    pub category_ids: Vec<DbId>,
    pub score: i32,
    pub full_score: i32,
    pub questions: Vec<AnsweredQuestion>,
    #[serde(default)]
    pub time_taken_secs: i32,
}
