//! Quorum thresholds for regular-admin voting.

use crate::error::CoreError;

use super::{Resolution, VoteTally};

/// Default number of approving admins needed to approve a target.
pub const DEFAULT_APPROVAL_QUORUM: u32 = 2;

/// Default number of denying admins needed to reject a target.
pub const DEFAULT_DENIAL_QUORUM: u32 = 2;

/// Approval (`Qa`) and denial (`Qd`) quorums for one deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuorumPolicy {
    approval_quorum: u32,
    denial_quorum: u32,
}

impl QuorumPolicy {
    /// Build a policy. Both quorums must be at least 1.
    pub fn new(approval_quorum: u32, denial_quorum: u32) -> Result<Self, CoreError> {
        if approval_quorum == 0 || denial_quorum == 0 {
            return Err(CoreError::Validation(format!(
                "Quorums must be at least 1 (approval: {approval_quorum}, denial: {denial_quorum})"
            )));
        }
        Ok(Self {
            approval_quorum,
            denial_quorum,
        })
    }

    pub fn approval_quorum(&self) -> u32 {
        self.approval_quorum
    }

    pub fn denial_quorum(&self) -> u32 {
        self.denial_quorum
    }

    /// Decide whether the tally forces a terminal outcome.
    ///
    /// Approval is checked first: if both quorums are met at once, the
    /// target is approved.
    pub fn evaluate(&self, tally: VoteTally) -> Option<Resolution> {
        if tally.approvals >= self.approval_quorum {
            Some(Resolution::Approved)
        } else if tally.denials >= self.denial_quorum {
            Some(Resolution::Rejected)
        } else {
            None
        }
    }
}

impl Default for QuorumPolicy {
    fn default() -> Self {
        Self {
            approval_quorum: DEFAULT_APPROVAL_QUORUM,
            denial_quorum: DEFAULT_DENIAL_QUORUM,
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn t(approvals: u32, denials: u32) -> VoteTally {
        VoteTally { approvals, denials }
    }

    #[test]
    fn zero_quorum_is_rejected() {
        assert_matches!(QuorumPolicy::new(0, 2), Err(CoreError::Validation(_)));
        assert_matches!(QuorumPolicy::new(2, 0), Err(CoreError::Validation(_)));
    }

    #[test]
    fn below_quorum_stays_open() {
        let policy = QuorumPolicy::default();
        assert_eq!(policy.evaluate(t(0, 0)), None);
        assert_eq!(policy.evaluate(t(1, 0)), None);
        assert_eq!(policy.evaluate(t(1, 1)), None);
    }

    #[test]
    fn approval_quorum_approves() {
        let policy = QuorumPolicy::default();
        assert_eq!(policy.evaluate(t(2, 0)), Some(Resolution::Approved));
        assert_eq!(policy.evaluate(t(2, 1)), Some(Resolution::Approved));
    }

    #[test]
    fn denial_quorum_rejects() {
        let policy = QuorumPolicy::default();
        assert_eq!(policy.evaluate(t(1, 2)), Some(Resolution::Rejected));
    }

    #[test]
    fn approval_wins_when_both_met() {
        let policy = QuorumPolicy::new(1, 1).unwrap();
        assert_eq!(policy.evaluate(t(1, 1)), Some(Resolution::Approved));
    }
}
