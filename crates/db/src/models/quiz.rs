//! Quiz question model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use quizbank_core::content::QuestionType;
use quizbank_core::status::{ContentStatus, StatusId};
use quizbank_core::types::{DbId, Timestamp};

/// A row from the `quizzes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Quiz {
    pub id: DbId,
    pub question: String,
    pub question_type: String,
    pub choices: Vec<String>,
    pub correct_answers: Vec<String>,
    pub explanation: Option<String>,
    pub images: Vec<String>,
    pub subject_id: DbId,
    pub category_id: DbId,
    pub created_by: DbId,
    #[serde(rename = "status", serialize_with = "super::serialize_content_status")]
    pub status_id: StatusId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Quiz {
    pub fn status(&self) -> Option<ContentStatus> {
        ContentStatus::from_id(self.status_id)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateQuiz {
    pub question: String,
    pub question_type: QuestionType,
    #[serde(default)]
    pub choices: Vec<String>,
    pub correct_answers: Vec<String>,
    pub explanation: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    pub subject_id: DbId,
    pub category_id: DbId,
}

/// Content patch. Subject and category are fixed after creation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateQuiz {
    pub question: Option<String>,
    pub question_type: Option<QuestionType>,
    pub choices: Option<Vec<String>>,
    pub correct_answers: Option<Vec<String>>,
    pub explanation: Option<String>,
    pub images: Option<Vec<String>>,
}

/// Optional filters for listing quizzes.
#[derive(Debug, Clone, Default)]
pub struct QuizFilter {
    pub subject_id: Option<DbId>,
    pub category_id: Option<DbId>,
    pub status: Option<ContentStatus>,
}
