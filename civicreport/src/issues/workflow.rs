//! Status workflow for issues
//!
//! Three states: Pending, In Progress, Resolved. Any state may move to any
//! other, including back out of Resolved; the observed system deliberately
//! lets an admin reopen a resolved issue, with no audit trail. The single
//! mandated side effect is the `resolved_on` stamp: set on entering
//! Resolved, cleared on leaving it.
//!
//! Role enforcement is the caller's obligation, not the repository's:
//! [`IssueRepository::set_status`] rejects non-admin actors before the
//! store is touched, and the repository's raw `update` stays policy-free.

use crate::auth::User;
use crate::error::{CivicReportError, Result};
use crate::issues::{Issue, IssueRepository, Status};
use crate::Role;
use chrono::Utc;
use tracing::debug;

/// Compute the issue value after a status transition
///
/// Idempotent: re-applying the current status changes nothing besides
/// normalizing an inconsistent `resolved_on`. An issue already Resolved
/// keeps its original resolution timestamp.
pub fn apply_status(issue: &Issue, status: Status) -> Issue {
    let resolved_on = match status {
        Status::Resolved => match (issue.status, issue.resolved_on) {
            (Status::Resolved, Some(existing)) => Some(existing),
            _ => Some(Utc::now()),
        },
        _ => None,
    };
    Issue {
        status,
        resolved_on,
        ..issue.clone()
    }
}

impl IssueRepository {
    /// Transition an issue's status on behalf of an admin
    ///
    /// Returns `PermissionDenied` for any non-admin actor. Returns
    /// `Ok(None)` when the issue no longer exists in the store (stale
    /// reference), matching [`IssueRepository::update`].
    pub async fn set_status(
        &self,
        actor: &User,
        issue: &Issue,
        status: Status,
    ) -> Result<Option<Issue>> {
        if actor.role != Role::Admin {
            return Err(CivicReportError::PermissionDenied(format!(
                "user {} may not change issue status",
                actor.username
            )));
        }
        debug!("Setting issue {} status to {}", issue.id, status);
        self.update(apply_status(issue, status)).await
    }
}
