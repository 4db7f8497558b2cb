//! Query parameter types shared by list endpoints.

use serde::Deserialize;
use quizbank_core::approval::ContentKind;
use quizbank_core::status::ContentStatus;
use quizbank_core::types::DbId;

use crate::error::AppError;

/// `?subject_id=&category_id=&status=` filters for quizzes and keyword sets.
#[derive(Debug, Default, Deserialize)]
pub struct ContentListParams {
    pub subject_id: Option<DbId>,
    pub category_id: Option<DbId>,
    pub status: Option<String>,
}

impl ContentListParams {
    /// Parse the `status` filter, rejecting unknown names with 400.
    pub fn status(&self) -> Result<Option<ContentStatus>, AppError> {
        self.status
            .as_deref()
            .map(|name| {
                ContentStatus::parse(name).ok_or_else(|| {
                    AppError::BadRequest(format!(
                        "Invalid status '{name}'. Must be one of: {}",
                        ContentStatus::valid_names()
                    ))
                })
            })
            .transpose()
    }
}

/// `?subject_id=` filter for categories.
#[derive(Debug, Default, Deserialize)]
pub struct SubjectFilterParams {
    pub subject_id: Option<DbId>,
}

/// `?type=&user_id=` filters for reports.
#[derive(Debug, Default, Deserialize)]
pub struct ReportListParams {
    #[serde(rename = "type")]
    pub report_type: Option<String>,
    pub user_id: Option<DbId>,
}

impl ReportListParams {
    pub fn report_type(&self) -> Result<Option<ContentKind>, AppError> {
        self.report_type
            .as_deref()
            .map(|name| {
                ContentKind::parse(name).ok_or_else(|| {
                    AppError::BadRequest(format!(
                        "Invalid report type '{name}'. Must be one of: quiz, keyword"
                    ))
                })
            })
            .transpose()
    }
}

/// `?user_id=` filter for scores.
#[derive(Debug, Default, Deserialize)]
pub struct UserFilterParams {
    pub user_id: Option<DbId>,
}
