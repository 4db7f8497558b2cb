//! Aggregate counters for the admin overview.

use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StatsOverview {
    pub users: i64,
    pub quizzes: i64,
    pub keywords: i64,
    pub reports: i64,
    pub pending_quizzes: i64,
    pub pending_keywords: i64,
    pub pending_reports: i64,
}
