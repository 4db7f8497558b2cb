//! In-memory [`ApprovalStore`] used by the engine tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::error::CoreError;
use crate::status::{ContentStatus, ReportStatus};
use crate::types::DbId;

use super::{
    ApprovalStore, CastVote, ContentKind, ReportLinks, ResolutionPlan, TargetKind, TargetRef,
    TargetState, TargetStatus,
};

struct StoredReport {
    status: ReportStatus,
    links: ReportLinks,
    reason: Option<String>,
}

#[derive(Default)]
struct State {
    content: HashMap<(ContentKind, DbId), ContentStatus>,
    reports: HashMap<DbId, StoredReport>,
    votes: HashMap<TargetRef, Vec<CastVote>>,
    fail_next_commit: bool,
    resolve_before_vote: Option<(ContentKind, DbId, ContentStatus)>,
    commits: usize,
}

#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_content(&self, kind: ContentKind, id: DbId, status: ContentStatus) {
        self.state
            .lock()
            .unwrap()
            .content
            .insert((kind, id), status);
    }

    /// Insert a pending report and mark both referenced entities reported.
    pub fn insert_report(&self, id: DbId, kind: ContentKind, original_id: DbId, suggested_id: DbId) {
        let mut state = self.state.lock().unwrap();
        state
            .content
            .insert((kind, original_id), ContentStatus::Reported);
        state
            .content
            .insert((kind, suggested_id), ContentStatus::Reported);
        state.reports.insert(
            id,
            StoredReport {
                status: ReportStatus::Pending,
                links: ReportLinks {
                    kind,
                    original_id,
                    suggested_id,
                },
                reason: None,
            },
        );
    }

    pub fn content_status(&self, kind: ContentKind, id: DbId) -> Option<ContentStatus> {
        self.state.lock().unwrap().content.get(&(kind, id)).copied()
    }

    pub fn report_status(&self, id: DbId) -> Option<ReportStatus> {
        self.state.lock().unwrap().reports.get(&id).map(|r| r.status)
    }

    pub fn report_reason(&self, id: DbId) -> Option<String> {
        self.state
            .lock()
            .unwrap()
            .reports
            .get(&id)
            .and_then(|r| r.reason.clone())
    }

    pub fn vote_count(&self, target: TargetRef) -> usize {
        self.state
            .lock()
            .unwrap()
            .votes
            .get(&target)
            .map_or(0, Vec::len)
    }

    pub fn vote_of(&self, target: TargetRef, admin_id: DbId) -> Option<bool> {
        self.state
            .lock()
            .unwrap()
            .votes
            .get(&target)?
            .iter()
            .find(|v| v.admin_id == admin_id)
            .map(|v| v.approved)
    }

    /// Make the next `commit_resolution` fail before touching any state.
    pub fn fail_next_commit(&self) {
        self.state.lock().unwrap().fail_next_commit = true;
    }

    /// Move a content entity to `status` right before the next vote is
    /// recorded, as a concurrent writer outside this engine would.
    pub fn resolve_before_next_vote(&self, kind: ContentKind, id: DbId, status: ContentStatus) {
        self.state.lock().unwrap().resolve_before_vote = Some((kind, id, status));
    }

    /// Number of successful commits.
    pub fn commits(&self) -> usize {
        self.state.lock().unwrap().commits
    }
}

fn content_kind(kind: TargetKind) -> Option<ContentKind> {
    match kind {
        TargetKind::Quiz => Some(ContentKind::Quiz),
        TargetKind::Keyword => Some(ContentKind::Keyword),
        TargetKind::Report => None,
    }
}

fn is_pending(state: &State, target: TargetRef) -> bool {
    match content_kind(target.kind) {
        Some(kind) => state.content.get(&(kind, target.id)) == Some(&ContentStatus::Pending),
        None => state
            .reports
            .get(&target.id)
            .is_some_and(|r| r.status == ReportStatus::Pending),
    }
}

#[async_trait]
impl ApprovalStore for InMemoryStore {
    type View = Value;

    async fn load_target(&self, target: TargetRef) -> Result<Option<TargetState>, CoreError> {
        let state = self.state.lock().unwrap();
        Ok(match content_kind(target.kind) {
            Some(kind) => state.content.get(&(kind, target.id)).map(|s| TargetState {
                status: TargetStatus::Content(*s),
                links: None,
            }),
            None => state.reports.get(&target.id).map(|r| TargetState {
                status: TargetStatus::Report(r.status),
                links: Some(r.links),
            }),
        })
    }

    async fn record_vote(
        &self,
        target: TargetRef,
        admin_id: DbId,
        approved: bool,
    ) -> Result<Option<Vec<CastVote>>, CoreError> {
        let mut state = self.state.lock().unwrap();
        if let Some((kind, id, status)) = state.resolve_before_vote.take() {
            state.content.insert((kind, id), status);
            state.votes.remove(&TargetRef::new(kind.into(), id));
        }
        if !is_pending(&state, target) {
            return Ok(None);
        }
        let ballot = state.votes.entry(target).or_default();
        match ballot.iter_mut().find(|v| v.admin_id == admin_id) {
            Some(vote) => vote.approved = approved,
            None => ballot.push(CastVote { admin_id, approved }),
        }
        Ok(Some(ballot.clone()))
    }

    async fn list_votes(&self, target: TargetRef) -> Result<Vec<CastVote>, CoreError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .votes
            .get(&target)
            .cloned()
            .unwrap_or_default())
    }

    async fn commit_resolution(&self, plan: &ResolutionPlan) -> Result<bool, CoreError> {
        let mut state = self.state.lock().unwrap();
        if std::mem::take(&mut state.fail_next_commit) {
            return Err(CoreError::Internal("simulated storage failure".into()));
        }

        let target = plan.target;
        if !is_pending(&state, target) {
            return Ok(false);
        }

        for change in &plan.cascade {
            state.content.insert((change.kind, change.id), change.status);
        }
        match content_kind(target.kind) {
            Some(kind) => {
                state.content.insert((kind, target.id), plan.content_status());
            }
            None => {
                if let Some(report) = state.reports.get_mut(&target.id) {
                    report.status = plan.report_status();
                    if plan.reason.is_some() {
                        report.reason = plan.reason.clone();
                    }
                }
            }
        }
        state.votes.remove(&target);
        state.commits += 1;
        Ok(true)
    }

    async fn load_view(&self, target: TargetRef) -> Result<Option<Value>, CoreError> {
        let state = self.state.lock().unwrap();
        Ok(match content_kind(target.kind) {
            Some(kind) => state
                .content
                .get(&(kind, target.id))
                .map(|s| json!({ "id": target.id, "status": s.as_str() })),
            None => state.reports.get(&target.id).map(|r| {
                json!({
                    "id": target.id,
                    "status": r.status.as_str(),
                    "reason": r.reason,
                })
            }),
        })
    }
}
