//! The approval decision procedure.

use serde::Serialize;
use serde_json::Value;

use crate::error::CoreError;
use crate::roles::Role;
use crate::types::DbId;

use super::locks::TargetLocks;
use super::{
    tally, ApprovalStore, QuorumPolicy, Resolution, ResolutionPlan, TargetKind, TargetRef,
    TargetState, VoteTally,
};

/// Message returned while a target is still waiting on more votes.
pub const AWAITING_MESSAGE: &str = "Your decision has been recorded. Waiting for more responses.";

/// The administrator making a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: DbId,
    pub role: Role,
}

impl Actor {
    /// Only admins and super admins may decide.
    pub fn ensure_can_decide(self, kind: TargetKind) -> Result<(), CoreError> {
        if self.role.is_admin() {
            Ok(())
        } else {
            Err(CoreError::Forbidden(format!(
                "You have no permission to approve or deny {}s",
                kind.as_str()
            )))
        }
    }
}

/// A validated decision payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub approved: bool,
    /// Only stored for reports.
    pub reason: Option<String>,
}

impl Decision {
    /// Parse a raw JSON body.
    ///
    /// `approved` must be a JSON boolean (`Approved` is accepted as an
    /// alias); `reason`, when present and non-null, must be a string.
    pub fn from_payload(payload: &Value) -> Result<Self, CoreError> {
        let approved = match payload.get("approved").or_else(|| payload.get("Approved")) {
            Some(Value::Bool(approved)) => *approved,
            _ => {
                return Err(CoreError::Validation(
                    "'Approved' field must be a boolean".into(),
                ))
            }
        };

        let reason = match payload.get("reason") {
            None | Some(Value::Null) => None,
            Some(Value::String(reason)) => Some(reason.clone()),
            Some(_) => {
                return Err(CoreError::Validation(
                    "'reason' field must be a string".into(),
                ))
            }
        };

        Ok(Self { approved, reason })
    }
}

/// Where a decision left the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Approved,
    Rejected,
    Pending,
}

impl From<Resolution> for Outcome {
    fn from(resolution: Resolution) -> Self {
        match resolution {
            Resolution::Approved => Outcome::Approved,
            Resolution::Rejected => Outcome::Rejected,
        }
    }
}

/// How a terminal outcome was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DecidedBy {
    SuperAdmin,
    Quorum,
}

/// Result of one decision call.
#[derive(Debug, Serialize)]
pub struct DecisionReport<V> {
    pub outcome: Outcome,
    /// `null` while the ballot is still open.
    pub decided_by: Option<DecidedBy>,
    pub message: String,
    /// Ballot at the time of the decision (before cleanup).
    pub tally: VoteTally,
    /// The updated target, present only after a terminal transition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<V>,
}

/// Decides and executes admin decisions on pending targets.
///
/// One engine serves all three target kinds; kind-specific behaviour lives
/// in [`ResolutionPlan`].
pub struct ApprovalEngine<S> {
    store: S,
    policy: QuorumPolicy,
    locks: TargetLocks,
}

impl<S: ApprovalStore> ApprovalEngine<S> {
    pub fn new(store: S, policy: QuorumPolicy) -> Self {
        Self {
            store,
            policy,
            locks: TargetLocks::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn policy(&self) -> QuorumPolicy {
        self.policy
    }

    /// Validate a raw decision payload and apply it.
    ///
    /// Checks run in order and fail fast: role, payload, existence, status.
    pub async fn decide(
        &self,
        actor: Actor,
        target: TargetRef,
        payload: &Value,
    ) -> Result<DecisionReport<S::View>, CoreError> {
        actor.ensure_can_decide(target.kind)?;
        let decision = Decision::from_payload(payload)?;
        self.decide_with(actor, target, decision).await
    }

    /// Apply an already-parsed decision.
    pub async fn decide_with(
        &self,
        actor: Actor,
        target: TargetRef,
        decision: Decision,
    ) -> Result<DecisionReport<S::View>, CoreError> {
        actor.ensure_can_decide(target.kind)?;

        let _guard = self.locks.acquire(target).await;

        let state = self
            .store
            .load_target(target)
            .await?
            .ok_or(CoreError::NotFound {
                entity: target.kind.entity_name(),
                id: target.id,
            })?;

        if !state.status.is_pending() {
            tracing::info!(
                admin_id = actor.id,
                %target,
                status = state.status.as_str(),
                "Decision rejected: target not pending"
            );
            return Err(CoreError::Conflict(format!(
                "This {} has already been processed (status: {})",
                target.kind.as_str(),
                state.status.as_str()
            )));
        }

        if actor.role.is_super_admin() {
            let ballot = tally(&self.store.list_votes(target).await?);
            let resolution = Resolution::from_approved(decision.approved);
            return self
                .finalize(
                    target,
                    &state,
                    resolution,
                    DecidedBy::SuperAdmin,
                    decision.reason,
                    ballot,
                )
                .await;
        }

        let Some(votes) = self
            .store
            .record_vote(target, actor.id, decision.approved)
            .await?
        else {
            tracing::info!(
                admin_id = actor.id,
                %target,
                "Vote rejected: target left pending before it was recorded"
            );
            return Err(CoreError::Conflict(format!(
                "This {} has already been processed",
                target.kind.as_str()
            )));
        };
        let ballot = tally(&votes);

        tracing::info!(
            admin_id = actor.id,
            %target,
            approved = decision.approved,
            approvals = ballot.approvals,
            denials = ballot.denials,
            "Vote recorded"
        );

        match self.policy.evaluate(ballot) {
            Some(resolution) => {
                self.finalize(
                    target,
                    &state,
                    resolution,
                    DecidedBy::Quorum,
                    decision.reason,
                    ballot,
                )
                .await
            }
            None => Ok(DecisionReport {
                outcome: Outcome::Pending,
                decided_by: None,
                message: AWAITING_MESSAGE.to_string(),
                tally: ballot,
                target: None,
            }),
        }
    }

    async fn finalize(
        &self,
        target: TargetRef,
        state: &TargetState,
        resolution: Resolution,
        decided_by: DecidedBy,
        reason: Option<String>,
        ballot: VoteTally,
    ) -> Result<DecisionReport<S::View>, CoreError> {
        let plan = ResolutionPlan::build(target, state, resolution, reason)?;

        if !self.store.commit_resolution(&plan).await? {
            return Err(CoreError::Conflict(format!(
                "This {} has already been processed",
                target.kind.as_str()
            )));
        }

        tracing::info!(
            %target,
            resolution = resolution.as_str(),
            decided_by = ?decided_by,
            cascade = plan.cascade.len(),
            "Target resolved"
        );

        let view = self.store.load_view(target).await?;

        Ok(DecisionReport {
            outcome: resolution.into(),
            decided_by: Some(decided_by),
            message: resolution_message(target.kind, resolution, decided_by, ballot),
            tally: ballot,
            target: view,
        })
    }
}

fn resolution_message(
    kind: TargetKind,
    resolution: Resolution,
    decided_by: DecidedBy,
    ballot: VoteTally,
) -> String {
    let entity = kind.entity_name();
    let verb = resolution.as_str();
    match decided_by {
        DecidedBy::SuperAdmin => format!("{entity} {verb} directly by super admin"),
        DecidedBy::Quorum => {
            let votes = match resolution {
                Resolution::Approved => ballot.approvals,
                Resolution::Rejected => ballot.denials,
            };
            format!("{entity} {verb} by {votes} admins")
        }
    }
}
