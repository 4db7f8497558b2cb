//! Aggregate counts for the admin overview.

use sqlx::PgPool;
use quizbank_core::status::{ContentStatus, ReportStatus};

use crate::models::stats::StatsOverview;

pub struct StatsRepo;

impl StatsRepo {
    pub async fn overview(pool: &PgPool) -> Result<StatsOverview, sqlx::Error> {
        sqlx::query_as::<_, StatsOverview>(
            "SELECT
                (SELECT COUNT(*) FROM users) AS users,
                (SELECT COUNT(*) FROM quizzes) AS quizzes,
                (SELECT COUNT(*) FROM keywords) AS keywords,
                (SELECT COUNT(*) FROM reports) AS reports,
                (SELECT COUNT(*) FROM quizzes WHERE status_id = $1) AS pending_quizzes,
                (SELECT COUNT(*) FROM keywords WHERE status_id = $1) AS pending_keywords,
                (SELECT COUNT(*) FROM reports WHERE status_id = $2) AS pending_reports",
        )
        .bind(ContentStatus::Pending.id())
        .bind(ReportStatus::Pending.id())
        .fetch_one(pool)
        .await
    }
}
