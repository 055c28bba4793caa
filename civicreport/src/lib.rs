//! # CivicReport
//!
//! Community infrastructure issue reporting and triage engine.
//!
//! Citizens report local problems (roads, waste, power, water, security),
//! everyone discusses and upvotes them, and administrators move them through
//! a Pending / In Progress / Resolved workflow. The engine owns the data
//! model, the status state machine, the deterministic listing order, and the
//! persistence discipline over a small key-value store; presentation layers
//! are external collaborators that only call the read/write operations here.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use civicreport::{
//!     Category, IssueDraft, IssueRepository, MemoryKeyValueStore, SessionStore,
//! };
//! use std::sync::Arc;
//!
//! # async fn example() -> civicreport::Result<()> {
//! let store = Arc::new(MemoryKeyValueStore::new());
//! let sessions = Arc::new(SessionStore::new(store.clone()));
//! let repository = IssueRepository::new(store, sessions);
//!
//! let issue = repository
//!     .add(IssueDraft::new(
//!         "Blocked drainage at school road",
//!         Category::Roads,
//!         "Standing water after every rainfall.",
//!     ))
//!     .await?;
//!
//! let mut issues = repository.get_all().await?;
//! civicreport::sort_for_display(&mut issues);
//! println!("{} open reports", issues.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

/// Credential directory and session store
pub mod auth;

/// Configuration management
pub mod config;

/// Error types used throughout the engine
pub mod error;

/// Issue domain model, repository, workflow, engagement, and sort policy
pub mod issues;

/// Key-value store abstractions and implementations
pub mod store;

// Re-export the collaborator-facing API
pub use auth::{CredentialDirectory, Role, SessionStore, User};
pub use config::Config;
pub use error::{CivicReportError, Result};
pub use issues::{
    apply_status, sort_for_display, Category, Comment, Issue, IssueDraft, IssueId,
    IssueRepository, Location, Status,
};
pub use store::{FileSystemKeyValueStore, KeyValueStore, MemoryKeyValueStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        apply_status, sort_for_display, Category, CivicReportError, Comment, Issue, IssueDraft,
        IssueId, IssueRepository, KeyValueStore, Location, Result, Role, SessionStore, Status,
        User,
    };
}
