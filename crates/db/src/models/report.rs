//! Correction report model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use quizbank_core::approval::{ContentKind, ReportLinks};
use quizbank_core::status::{ReportStatus, StatusId};
use quizbank_core::types::{DbId, Timestamp};

use super::keyword::Keyword;
use super::quiz::Quiz;

/// A row from the `reports` table.
///
/// Exactly one of the quiz or keyword column pairs is populated, matching
/// `report_type`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Report {
    pub id: DbId,
    #[serde(rename = "type")]
    pub report_type: String,
    pub original_quiz_id: Option<DbId>,
    pub suggested_quiz_id: Option<DbId>,
    pub original_keyword_id: Option<DbId>,
    pub suggested_keyword_id: Option<DbId>,
    pub user_id: DbId,
    pub reason: Option<String>,
    #[serde(rename = "status", serialize_with = "super::serialize_report_status")]
    pub status_id: StatusId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Report {
    pub fn status(&self) -> Option<ReportStatus> {
        ReportStatus::from_id(self.status_id)
    }

    /// The original/suggested pair this report references.
    ///
    /// `None` only if the row violates `ck_reports_pair`.
    pub fn links(&self) -> Option<ReportLinks> {
        match ContentKind::parse(&self.report_type)? {
            ContentKind::Quiz => Some(ReportLinks {
                kind: ContentKind::Quiz,
                original_id: self.original_quiz_id?,
                suggested_id: self.suggested_quiz_id?,
            }),
            ContentKind::Keyword => Some(ReportLinks {
                kind: ContentKind::Keyword,
                original_id: self.original_keyword_id?,
                suggested_id: self.suggested_keyword_id?,
            }),
        }
    }
}

/// Request body for filing a report.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateReport {
    #[serde(rename = "type")]
    pub report_type: ContentKind,
    pub original_id: DbId,
    pub suggested_id: DbId,
    pub reason: Option<String>,
}

/// Either side of a report pair.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ReportedEntity {
    Quiz(Quiz),
    Keyword(Keyword),
}

/// A report with its original and suggested entities loaded.
#[derive(Debug, Clone, Serialize)]
pub struct ReportDetail {
    #[serde(flatten)]
    pub report: Report,
    pub original: Option<ReportedEntity>,
    pub suggested: Option<ReportedEntity>,
}

#[derive(Debug, Clone, Default)]
pub struct ReportFilter {
    pub report_type: Option<ContentKind>,
    pub user_id: Option<DbId>,
}
