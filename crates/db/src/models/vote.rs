//! Admin vote ledger row.

use serde::Serialize;
use sqlx::FromRow;
use quizbank_core::types::{DbId, Timestamp};

/// A row from the `votes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Vote {
    pub id: DbId,
    pub admin_id: DbId,
    pub target_kind: String,
    pub target_id: DbId,
    pub approved: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
