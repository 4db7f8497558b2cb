//! Persistence seam for the approval engine.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::CoreError;
use crate::types::DbId;

use super::{ResolutionPlan, TargetRef, TargetState};

/// One live vote in a target's ballot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastVote {
    pub admin_id: DbId,
    pub approved: bool,
}

/// Content store + vote ledger operations the engine relies on.
///
/// The engine only ever changes statuses (and a report's reason); content
/// fields are owned by the CRUD layer.
#[async_trait]
pub trait ApprovalStore: Send + Sync {
    /// Serializable snapshot of a target returned to callers after a
    /// terminal transition (reports include their original/suggested pair).
    type View: Serialize + Send + Sync;

    /// Current status of a target, or `None` if it does not exist.
    async fn load_target(&self, target: TargetRef) -> Result<Option<TargetState>, CoreError>;

    /// Insert or overwrite this admin's vote on `target` and return the live
    /// ballot, as one unit that only happens while `target` is pending.
    ///
    /// Returns `None` without writing anything when the target has left
    /// `pending` (for example, finalized by another process).
    async fn record_vote(
        &self,
        target: TargetRef,
        admin_id: DbId,
        approved: bool,
    ) -> Result<Option<Vec<CastVote>>, CoreError>;

    /// Every live vote on `target`.
    async fn list_votes(&self, target: TargetRef) -> Result<Vec<CastVote>, CoreError>;

    /// Apply `plan` as one unit: cascade, finalize the target only if it is
    /// still pending, store the reason, and delete the target's votes.
    ///
    /// Returns `false` without changing anything when the target is no
    /// longer pending.
    async fn commit_resolution(&self, plan: &ResolutionPlan) -> Result<bool, CoreError>;

    /// Snapshot of `target` for the response body.
    async fn load_view(&self, target: TargetRef) -> Result<Option<Self::View>, CoreError>;
}
