//! Terminal mutations for each target kind.
//!
//! A [`ResolutionPlan`] is everything a store must apply, as one unit, when
//! a target reaches a terminal outcome: the dependent-entity cascade, the
//! target's own status, the report reason, and the ballot cleanup.

use crate::error::CoreError;
use crate::status::{ContentStatus, ReportStatus};
use crate::types::DbId;

use super::{ContentKind, ReportLinks, Resolution, TargetKind, TargetRef, TargetState};

/// One dependent-entity status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    pub kind: ContentKind,
    pub id: DbId,
    pub status: ContentStatus,
}

/// The full set of mutations for one terminal transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionPlan {
    pub target: TargetRef,
    pub resolution: Resolution,
    /// Applied before the target itself is finalized.
    pub cascade: Vec<StatusChange>,
    /// Stored on reports only; `None` keeps any existing reason.
    pub reason: Option<String>,
}

impl ResolutionPlan {
    /// Build the plan for resolving `target` (currently in `state`).
    ///
    /// Fails with `Internal` if a report target arrives without its links,
    /// which means the store returned an inconsistent row.
    pub fn build(
        target: TargetRef,
        state: &TargetState,
        resolution: Resolution,
        reason: Option<String>,
    ) -> Result<Self, CoreError> {
        match target.kind {
            TargetKind::Quiz | TargetKind::Keyword => Ok(Self {
                target,
                resolution,
                cascade: Vec::new(),
                reason: None,
            }),
            TargetKind::Report => {
                let links = state.links.ok_or_else(|| {
                    CoreError::Internal(format!("{target} has no original/suggested pair"))
                })?;
                Ok(Self {
                    target,
                    resolution,
                    cascade: report_cascade(links, resolution),
                    reason,
                })
            }
        }
    }

    /// New status for a quiz or keyword target.
    pub fn content_status(&self) -> ContentStatus {
        match self.resolution {
            Resolution::Approved => ContentStatus::Approved,
            Resolution::Rejected => ContentStatus::Rejected,
        }
    }

    /// New status for a report target.
    pub fn report_status(&self) -> ReportStatus {
        match self.resolution {
            Resolution::Approved => ReportStatus::Approved,
            Resolution::Rejected => ReportStatus::Rejected,
        }
    }
}

/// Accepting a report promotes the suggestion and retires the original;
/// denying it reinstates the original and discards the suggestion.
fn report_cascade(links: ReportLinks, resolution: Resolution) -> Vec<StatusChange> {
    let (original, suggested) = match resolution {
        Resolution::Approved => (ContentStatus::Rejected, ContentStatus::Approved),
        Resolution::Rejected => (ContentStatus::Approved, ContentStatus::Rejected),
    };
    vec![
        StatusChange {
            kind: links.kind,
            id: links.suggested_id,
            status: suggested,
        },
        StatusChange {
            kind: links.kind,
            id: links.original_id,
            status: original,
        },
    ]
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::approval::TargetStatus;

    fn pending_report(kind: ContentKind) -> TargetState {
        TargetState {
            status: TargetStatus::Report(ReportStatus::Pending),
            links: Some(ReportLinks {
                kind,
                original_id: 10,
                suggested_id: 11,
            }),
        }
    }

    #[test]
    fn quiz_plan_has_no_cascade() {
        let state = TargetState {
            status: TargetStatus::Content(ContentStatus::Pending),
            links: None,
        };
        let plan = ResolutionPlan::build(
            TargetRef::quiz(1),
            &state,
            Resolution::Approved,
            Some("ignored".into()),
        )
        .unwrap();
        assert!(plan.cascade.is_empty());
        assert_eq!(plan.reason, None);
        assert_eq!(plan.content_status(), ContentStatus::Approved);
    }

    #[test]
    fn approved_report_promotes_suggestion() {
        let plan = ResolutionPlan::build(
            TargetRef::report(5),
            &pending_report(ContentKind::Quiz),
            Resolution::Approved,
            None,
        )
        .unwrap();
        assert_eq!(plan.report_status(), ReportStatus::Approved);
        assert!(plan.cascade.contains(&StatusChange {
            kind: ContentKind::Quiz,
            id: 11,
            status: ContentStatus::Approved,
        }));
        assert!(plan.cascade.contains(&StatusChange {
            kind: ContentKind::Quiz,
            id: 10,
            status: ContentStatus::Rejected,
        }));
    }

    #[test]
    fn rejected_report_reinstates_original() {
        let plan = ResolutionPlan::build(
            TargetRef::report(5),
            &pending_report(ContentKind::Keyword),
            Resolution::Rejected,
            Some("duplicate of existing set".into()),
        )
        .unwrap();
        assert_eq!(plan.report_status(), ReportStatus::Rejected);
        assert_eq!(plan.reason.as_deref(), Some("duplicate of existing set"));
        assert!(plan.cascade.contains(&StatusChange {
            kind: ContentKind::Keyword,
            id: 10,
            status: ContentStatus::Approved,
        }));
        assert!(plan.cascade.contains(&StatusChange {
            kind: ContentKind::Keyword,
            id: 11,
            status: ContentStatus::Rejected,
        }));
    }

    #[test]
    fn report_without_links_is_internal_error() {
        let state = TargetState {
            status: TargetStatus::Report(ReportStatus::Pending),
            links: None,
        };
        let result =
            ResolutionPlan::build(TargetRef::report(5), &state, Resolution::Approved, None);
        assert_matches!(result, Err(CoreError::Internal(_)));
    }
}
