use std::sync::Arc;

use quizbank_core::approval::ApprovalEngine;
use quizbank_db::PgApprovalStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: quizbank_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Approval engine shared by all decision requests, so per-target
    /// locking spans the whole process.
    pub approvals: Arc<ApprovalEngine<PgApprovalStore>>,
}

impl AppState {
    pub fn new(pool: quizbank_db::DbPool, config: ServerConfig) -> Self {
        let approvals = ApprovalEngine::new(PgApprovalStore::new(pool.clone()), config.quorum);
        Self {
            pool,
            config: Arc::new(config),
            approvals: Arc::new(approvals),
        }
    }
}
