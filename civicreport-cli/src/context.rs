//! Shared context for CLI command handlers
//!
//! Wires the filesystem store, session store, and issue repository together
//! once per invocation. Every handler goes through this context; the CLI
//! never touches the store keys directly.

use crate::error::{CliError, CliResult};
use crate::exit_codes::EXIT_WARNING;
use civicreport::{
    FileSystemKeyValueStore, Issue, IssueRepository, KeyValueStore, SessionStore, User,
};
use std::sync::Arc;

pub struct CliContext {
    pub repository: IssueRepository,
}

impl CliContext {
    /// Build the context over the default data directory (./.civicreport)
    pub fn new() -> CliResult<Self> {
        let store: Arc<dyn KeyValueStore> = Arc::new(FileSystemKeyValueStore::new_default()?);
        let sessions = Arc::new(SessionStore::new(store.clone()));
        Ok(Self {
            repository: IssueRepository::new(store, sessions),
        })
    }

    pub fn sessions(&self) -> &SessionStore {
        self.repository.sessions()
    }

    /// Fetch one issue by id, or fail with a not-found error
    pub async fn find_issue(&self, id: &str) -> CliResult<Issue> {
        let issues = self.repository.get_all().await?;
        issues
            .into_iter()
            .find(|issue| issue.id.as_str() == id)
            .ok_or_else(|| CliError::new(format!("Issue not found: {id}"), EXIT_WARNING))
    }

    /// Resolve the current session user, or fail with a login hint
    pub async fn require_user(&self) -> CliResult<User> {
        self.sessions().current_user().await?.ok_or_else(|| {
            CliError::new(
                "You must be logged in (try: civicreport login <username>)",
                EXIT_WARNING,
            )
        })
    }
}
