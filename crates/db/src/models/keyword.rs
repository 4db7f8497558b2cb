//! Keyword set model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use quizbank_core::status::{ContentStatus, StatusId};
use quizbank_core::types::{DbId, Timestamp};

/// A row from the `keywords` table.
///
/// Global sets are not tied to a subject or category.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Keyword {
    pub id: DbId,
    pub name: String,
    pub keywords: Vec<String>,
    pub is_global: bool,
    pub subject_id: Option<DbId>,
    pub category_id: Option<DbId>,
    pub created_by: DbId,
    #[serde(rename = "status", serialize_with = "super::serialize_content_status")]
    pub status_id: StatusId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Keyword {
    pub fn status(&self) -> Option<ContentStatus> {
        ContentStatus::from_id(self.status_id)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateKeyword {
    pub name: String,
    pub keywords: Vec<String>,
    #[serde(default)]
    pub is_global: bool,
    pub subject_id: Option<DbId>,
    pub category_id: Option<DbId>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateKeyword {
    pub name: Option<String>,
    pub keywords: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default)]
pub struct KeywordFilter {
    pub subject_id: Option<DbId>,
    pub category_id: Option<DbId>,
    pub status: Option<ContentStatus>,
}
