//! Vote counting.

use serde::Serialize;

use super::store::CastVote;

/// Running count of approve/deny votes on one target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VoteTally {
    pub approvals: u32,
    pub denials: u32,
}

impl VoteTally {
    pub fn total(&self) -> u32 {
        self.approvals + self.denials
    }
}

/// Count approvals and denials in the current ballot for one target.
///
/// The ledger guarantees at most one live vote per admin, so every entry
/// counts once.
pub fn tally(votes: &[CastVote]) -> VoteTally {
    votes.iter().fold(VoteTally::default(), |mut acc, vote| {
        if vote.approved {
            acc.approvals += 1;
        } else {
            acc.denials += 1;
        }
        acc
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vote(admin_id: i64, approved: bool) -> CastVote {
        CastVote { admin_id, approved }
    }

    #[test]
    fn empty_ballot_is_zero() {
        assert_eq!(tally(&[]), VoteTally::default());
    }

    #[test]
    fn two_approve_one_deny() {
        let votes = [vote(1, true), vote(2, true), vote(3, false)];
        let t = tally(&votes);
        assert_eq!(t, VoteTally { approvals: 2, denials: 1 });
        assert_eq!(t.total(), 3);
    }

    #[test]
    fn all_denials() {
        let votes = [vote(1, false), vote(2, false)];
        assert_eq!(tally(&votes), VoteTally { approvals: 0, denials: 2 });
    }
}
