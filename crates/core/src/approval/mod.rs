//! Multi-admin approval workflow shared by quizzes, keywords and reports.
//!
//! A pending target is resolved either by a single super-admin decision or
//! by enough regular-admin votes to reach the configured quorum. Reports
//! additionally cascade a status change onto the original and suggested
//! entities they reference.
//!
//! - [`tally`] -- pure vote counting.
//! - [`policy`] -- quorum thresholds.
//! - [`plan`] -- the terminal mutations for each target kind.
//! - [`locks`] -- per-target serialization of decisions.
//! - [`store`] -- the persistence seam.
//! - [`engine`] -- the decision procedure tying it together.

pub mod engine;
pub mod locks;
pub mod plan;
pub mod policy;
pub mod store;
pub mod tally;

#[cfg(test)]
mod memory;

use serde::{Deserialize, Serialize};

use crate::status::{ContentStatus, ReportStatus};
use crate::types::DbId;

pub use engine::{Actor, ApprovalEngine, DecidedBy, Decision, DecisionReport, Outcome};
pub use plan::{ResolutionPlan, StatusChange};
pub use policy::QuorumPolicy;
pub use store::{ApprovalStore, CastVote};
pub use tally::{tally, VoteTally};

/// Content entities that can be voted on directly and referenced by reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Quiz,
    Keyword,
}

impl ContentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentKind::Quiz => "quiz",
            ContentKind::Keyword => "keyword",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "quiz" => Some(ContentKind::Quiz),
            "keyword" => Some(ContentKind::Keyword),
            _ => None,
        }
    }

    /// Entity name used in [`CoreError::NotFound`](crate::error::CoreError::NotFound).
    pub fn entity_name(self) -> &'static str {
        match self {
            ContentKind::Quiz => "Quiz",
            ContentKind::Keyword => "Keyword",
        }
    }
}

/// Every kind of entity that can be the target of an approval decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    Quiz,
    Keyword,
    Report,
}

impl TargetKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TargetKind::Quiz => "quiz",
            TargetKind::Keyword => "keyword",
            TargetKind::Report => "report",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "quiz" => Some(TargetKind::Quiz),
            "keyword" => Some(TargetKind::Keyword),
            "report" => Some(TargetKind::Report),
            _ => None,
        }
    }

    pub fn entity_name(self) -> &'static str {
        match self {
            TargetKind::Quiz => "Quiz",
            TargetKind::Keyword => "Keyword",
            TargetKind::Report => "Report",
        }
    }
}

impl From<ContentKind> for TargetKind {
    fn from(kind: ContentKind) -> Self {
        match kind {
            ContentKind::Quiz => TargetKind::Quiz,
            ContentKind::Keyword => TargetKind::Keyword,
        }
    }
}

/// A typed reference to one approval target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TargetRef {
    pub kind: TargetKind,
    pub id: DbId,
}

impl TargetRef {
    pub fn new(kind: TargetKind, id: DbId) -> Self {
        Self { kind, id }
    }

    pub fn quiz(id: DbId) -> Self {
        Self::new(TargetKind::Quiz, id)
    }

    pub fn keyword(id: DbId) -> Self {
        Self::new(TargetKind::Keyword, id)
    }

    pub fn report(id: DbId) -> Self {
        Self::new(TargetKind::Report, id)
    }
}

impl std::fmt::Display for TargetRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.kind.as_str(), self.id)
    }
}

/// Terminal outcome of an approval decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    Approved,
    Rejected,
}

impl Resolution {
    pub fn from_approved(approved: bool) -> Self {
        if approved {
            Resolution::Approved
        } else {
            Resolution::Rejected
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Resolution::Approved => "approved",
            Resolution::Rejected => "rejected",
        }
    }
}

/// The original/suggested pair a report proposes to swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportLinks {
    pub kind: ContentKind,
    pub original_id: DbId,
    pub suggested_id: DbId,
}

/// Current status of a target, typed by target family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetStatus {
    Content(ContentStatus),
    Report(ReportStatus),
}

impl TargetStatus {
    /// Only pending targets may enter the voting protocol.
    pub fn is_pending(self) -> bool {
        matches!(
            self,
            TargetStatus::Content(ContentStatus::Pending)
                | TargetStatus::Report(ReportStatus::Pending)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TargetStatus::Content(s) => s.as_str(),
            TargetStatus::Report(s) => s.as_str(),
        }
    }
}

/// What the engine needs to know about a target before deciding on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetState {
    pub status: TargetStatus,
    /// Populated for reports only.
    pub links: Option<ReportLinks>,
}
