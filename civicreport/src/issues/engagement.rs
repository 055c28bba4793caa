//! Comments and upvotes
//!
//! Both are issue-update operations: the caller-visible methods construct
//! the next issue value and submit it through the repository's single write
//! path. Comment threads are append-only; upvote counters only ever grow.

use crate::error::{CivicReportError, Result};
use crate::issues::{Comment, Issue, IssueRepository};
use crate::Role;
use chrono::Utc;
use tracing::debug;

impl IssueRepository {
    /// Append a comment to an issue's discussion thread
    ///
    /// The comment id is the prior comment count plus one, local to the
    /// parent issue. Text that is empty after trimming is a validation
    /// error. Returns `Ok(None)` when the issue no longer exists.
    pub async fn add_comment(
        &self,
        issue: &Issue,
        author: impl Into<String>,
        text: &str,
        role: Role,
    ) -> Result<Option<Issue>> {
        let text = text.trim();
        if text.is_empty() {
            return Err(CivicReportError::Validation(
                "comment text must not be empty".to_string(),
            ));
        }

        let comment = Comment {
            comment_id: issue.comments.len() as u32 + 1,
            author: author.into(),
            text: text.to_string(),
            timestamp: Utc::now(),
            role,
        };

        let mut comments = issue.comments.clone();
        comments.push(comment);
        debug!(
            "Appending comment {} to issue {}",
            comments.len(),
            issue.id
        );
        self.update(Issue {
            comments,
            ..issue.clone()
        })
        .await
    }

    /// Increment an issue's upvote counter by exactly one
    ///
    /// There is no upper bound and no double-vote check: every call
    /// increments regardless of caller identity, matching the observed
    /// system. Returns `Ok(None)` when the issue no longer exists.
    pub async fn upvote(&self, issue: &Issue) -> Result<Option<Issue>> {
        debug!("Upvoting issue {}", issue.id);
        self.update(Issue {
            upvotes: issue.upvotes + 1,
            ..issue.clone()
        })
        .await
    }
}
