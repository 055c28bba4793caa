//! Persisted issue collection
//!
//! The repository is the sole writer to the issues store key. Every
//! mutation, including status changes, upvotes, and comment appends, goes
//! through whole-record replacement via [`IssueRepository::update`]. The
//! read-modify-write cycle behind each write is serialized through a single
//! lock, so two racing logical callers cannot silently drop each other's
//! update.

use crate::auth::SessionStore;
use crate::config::Config;
use crate::error::{CivicReportError, Result};
use crate::issues::{Category, Comment, Issue, IssueDraft, IssueId, Location, Status};
use crate::store::KeyValueStore;
use crate::Role;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Repository owning the persisted issue collection
pub struct IssueRepository {
    store: Arc<dyn KeyValueStore>,
    sessions: Arc<SessionStore>,
    /// Serializes read-modify-write cycles; without it two racing writers
    /// would apply last-writer-wins and lose one update
    write_lock: Mutex<()>,
}

impl IssueRepository {
    /// Create a repository over a key-value backend, resolving reporter
    /// names through the given session store
    pub fn new(store: Arc<dyn KeyValueStore>, sessions: Arc<SessionStore>) -> Self {
        Self {
            store,
            sessions,
            write_lock: Mutex::new(()),
        }
    }

    /// Fetch the full issue collection in storage order
    ///
    /// On first access (key absent) the collection is initialized with the
    /// fixed seed set and persisted before returning. A corrupt stored
    /// collection degrades to "absent" and is reseeded rather than
    /// propagating a parse failure.
    pub async fn get_all(&self) -> Result<Vec<Issue>> {
        match self.load_collection().await? {
            Some(issues) => Ok(issues),
            None => {
                let seeds = seed_issues()?;
                debug!("Issues store empty, seeding {} sample issues", seeds.len());
                self.save_collection(&seeds).await?;
                Ok(seeds)
            }
        }
    }

    /// Validate a draft and append it to the collection
    ///
    /// Assigns the id and all derived fields: `status` Pending, `upvotes` 0,
    /// empty comment thread, `reported_on` now, and `reporter_name` from the
    /// current session (or "Anonymous" without one). A generated id that
    /// collides with a stored issue is an error, never an overwrite.
    pub async fn add(&self, draft: IssueDraft) -> Result<Issue> {
        let title = draft.title.trim();
        let description = draft.description.trim();
        if title.is_empty() {
            return Err(CivicReportError::Validation(
                "title must not be empty".to_string(),
            ));
        }
        if description.is_empty() {
            return Err(CivicReportError::Validation(
                "description must not be empty".to_string(),
            ));
        }
        let config = Config::global();
        if title.len() > config.max_title_length {
            return Err(CivicReportError::Validation(format!(
                "title exceeds {} characters",
                config.max_title_length
            )));
        }
        if description.len() > config.max_description_length {
            return Err(CivicReportError::Validation(format!(
                "description exceeds {} characters",
                config.max_description_length
            )));
        }

        let reporter_name = self
            .sessions
            .current_user()
            .await?
            .map(|user| user.display_name)
            .unwrap_or_else(|| "Anonymous".to_string());

        let _lock = self.write_lock.lock().await;
        let mut issues = self.get_all().await?;

        let id = IssueId::generate();
        if issues.iter().any(|issue| issue.id == id) {
            return Err(CivicReportError::DuplicateIssueId(id.to_string()));
        }

        let issue = Issue {
            id,
            reporter_name,
            title: title.to_string(),
            category: draft.category,
            description: description.to_string(),
            location: draft.location,
            media_url: draft.media_url,
            status: Status::Pending,
            reported_on: Utc::now(),
            resolved_on: None,
            upvotes: 0,
            comments: Vec::new(),
        };

        issues.push(issue.clone());
        self.save_collection(&issues).await?;
        debug!("Added issue {} ({})", issue.id, issue.title);
        Ok(issue)
    }

    /// Replace the stored record with the same id, wholesale
    ///
    /// Callers must supply the merged, already-valid record; the repository
    /// does not validate domain transition legality. Returns `Ok(None)` when
    /// no issue with that id exists: the repository cannot distinguish a
    /// stale reference from an already-removed record, so the caller must
    /// treat this as a no-op, not a failure.
    pub async fn update(&self, updated: Issue) -> Result<Option<Issue>> {
        let _lock = self.write_lock.lock().await;
        let mut issues = self.get_all().await?;

        let Some(slot) = issues.iter_mut().find(|issue| issue.id == updated.id) else {
            debug!("Update target {} not found, no-op", updated.id);
            return Ok(None);
        };
        *slot = updated.clone();

        self.save_collection(&issues).await?;
        debug!("Updated issue {}", updated.id);
        Ok(Some(updated))
    }

    /// Access to the session store backing reporter and actor resolution
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Load the stored collection; `None` means absent or unreadable
    async fn load_collection(&self) -> Result<Option<Vec<Issue>>> {
        let Some(raw) = self.store.get(&Config::global().issues_key).await? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(issues) => Ok(Some(issues)),
            Err(e) => {
                warn!("Corrupt issues store, treating as empty: {}", e);
                Ok(None)
            }
        }
    }

    /// Persist the full collection
    async fn save_collection(&self, issues: &[Issue]) -> Result<()> {
        let serialized = serde_json::to_string(issues)?;
        self.store
            .set(&Config::global().issues_key, serialized)
            .await
    }
}

/// Timestamp for a seed literal; the fallback is unreachable for the
/// well-formed constants below
fn seed_timestamp(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

/// The fixed seed set written on first access to an empty store
fn seed_issues() -> Result<Vec<Issue>> {
    Ok(vec![
        Issue {
            id: IssueId::from_string("RPT-1704067200000".to_string())?,
            reporter_name: "Anonymous".to_string(),
            title: "Major Pothole near KASU Gate".to_string(),
            category: Category::Roads,
            description: "There is a huge, car-damaging pothole right at the entrance of the \
                          university road. Needs urgent attention."
                .to_string(),
            location: Some(Location {
                lat: 10.518,
                lng: 7.433,
                address: None,
            }),
            media_url: Some(
                "https://via.placeholder.com/150/f44336/ffffff?text=Pothole".to_string(),
            ),
            status: Status::Pending,
            reported_on: seed_timestamp("2025-12-01T10:00:00Z"),
            resolved_on: None,
            upvotes: 12,
            comments: vec![Comment {
                comment_id: 1,
                author: "Admin".to_string(),
                text: "Report acknowledged.".to_string(),
                timestamp: seed_timestamp("2025-12-01T12:00:00Z"),
                role: Role::Admin,
            }],
        },
        Issue {
            id: IssueId::from_string("RPT-1704153600000".to_string())?,
            reporter_name: "Nuhu Abdullahi".to_string(),
            title: "Water Leakage on Campus Hostel".to_string(),
            category: Category::WaterSupply,
            description: "A pipe burst inside Block D hostel. Water is being wasted.".to_string(),
            location: Some(Location {
                lat: 10.520,
                lng: 7.435,
                address: None,
            }),
            media_url: Some(
                "https://via.placeholder.com/150/2196F3/ffffff?text=Water+Leak".to_string(),
            ),
            status: Status::InProgress,
            reported_on: seed_timestamp("2025-12-02T14:30:00Z"),
            resolved_on: None,
            upvotes: 5,
            comments: vec![Comment {
                comment_id: 1,
                author: "Admin".to_string(),
                text: "Maintenance team deployed.".to_string(),
                timestamp: seed_timestamp("2025-12-02T16:00:00Z"),
                role: Role::Admin,
            }],
        },
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryKeyValueStore;

    fn create_test_repository() -> IssueRepository {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryKeyValueStore::new());
        let sessions = Arc::new(SessionStore::new(store.clone()));
        IssueRepository::new(store, sessions)
    }

    #[tokio::test]
    async fn test_first_access_seeds_store() {
        let repo = create_test_repository();

        let issues = repo.get_all().await.unwrap();
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].id.as_str(), "RPT-1704067200000");
        assert_eq!(issues[0].title, "Major Pothole near KASU Gate");
        assert_eq!(issues[0].category, Category::Roads);
        assert_eq!(issues[0].status, Status::Pending);
        assert_eq!(issues[0].upvotes, 12);
        assert_eq!(issues[0].comments.len(), 1);
        assert_eq!(issues[1].id.as_str(), "RPT-1704153600000");
        assert_eq!(issues[1].category, Category::WaterSupply);
        assert_eq!(issues[1].status, Status::InProgress);
        assert_eq!(issues[1].upvotes, 5);

        // Second read returns the persisted set, not a fresh seed
        let again = repo.get_all().await.unwrap();
        assert_eq!(again, issues);
    }

    #[tokio::test]
    async fn test_add_populates_derived_fields() {
        let repo = create_test_repository();

        let draft = IssueDraft::new("Streetlight out", Category::PowerOutages, "Dark corner");
        let issue = repo.add(draft).await.unwrap();

        assert_eq!(issue.status, Status::Pending);
        assert_eq!(issue.upvotes, 0);
        assert!(issue.comments.is_empty());
        assert_eq!(issue.resolved_on, None);
        assert_eq!(issue.reporter_name, "Anonymous");
        assert!(issue.id.as_str().starts_with("RPT-"));

        let issues = repo.get_all().await.unwrap();
        assert_eq!(issues.len(), 3);
        assert!(issues.contains(&issue));
        // Unique against the seeds and anything else stored
        let matching = issues.iter().filter(|i| i.id == issue.id).count();
        assert_eq!(matching, 1);
    }

    #[tokio::test]
    async fn test_add_uses_session_display_name() {
        let repo = create_test_repository();
        repo.sessions().login("citizen", "password").await.unwrap();

        let issue = repo
            .add(IssueDraft::new("Burst pipe", Category::WaterSupply, "Leaking"))
            .await
            .unwrap();
        assert_eq!(issue.reporter_name, "Nuhu Abdullahi");
    }

    #[tokio::test]
    async fn test_add_rejects_blank_fields() {
        let repo = create_test_repository();

        let result = repo
            .add(IssueDraft::new("   ", Category::Roads, "Something"))
            .await;
        assert!(matches!(result, Err(CivicReportError::Validation(_))));

        let result = repo
            .add(IssueDraft::new("Title", Category::Roads, "\t\n"))
            .await;
        assert!(matches!(result, Err(CivicReportError::Validation(_))));

        // Nothing was written
        assert_eq!(repo.get_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_add_rejects_oversized_title() {
        let repo = create_test_repository();
        let long_title = "x".repeat(Config::global().max_title_length + 1);
        let result = repo
            .add(IssueDraft::new(long_title, Category::Other, "Desc"))
            .await;
        assert!(matches!(result, Err(CivicReportError::Validation(_))));
    }

    #[tokio::test]
    async fn test_add_trims_fields() {
        let repo = create_test_repository();
        let issue = repo
            .add(IssueDraft::new("  Pothole  ", Category::Roads, " Deep. "))
            .await
            .unwrap();
        assert_eq!(issue.title, "Pothole");
        assert_eq!(issue.description, "Deep.");
    }

    #[tokio::test]
    async fn test_update_replaces_whole_record() {
        let repo = create_test_repository();
        let mut issue = repo
            .add(IssueDraft::new("Title", Category::Security, "Desc"))
            .await
            .unwrap();

        issue.upvotes = 7;
        issue.title = "Edited title".to_string();
        let stored = repo.update(issue.clone()).await.unwrap().unwrap();
        assert_eq!(stored, issue);

        let reloaded = repo.get_all().await.unwrap();
        let found = reloaded.iter().find(|i| i.id == issue.id).unwrap();
        assert_eq!(found.upvotes, 7);
        assert_eq!(found.title, "Edited title");
    }

    #[tokio::test]
    async fn test_update_missing_id_is_noop() {
        let repo = create_test_repository();
        let before = repo.get_all().await.unwrap();

        let ghost = Issue {
            id: IssueId::from_string("RPT-does-not-exist".to_string()).unwrap(),
            ..before[0].clone()
        };
        let result = repo.update(ghost).await.unwrap();
        assert!(result.is_none());

        // Structurally unchanged
        let after = repo.get_all().await.unwrap();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_corrupt_store_degrades_to_reseed() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryKeyValueStore::new());
        store
            .set(&Config::global().issues_key, "][ not json".to_string())
            .await
            .unwrap();

        let sessions = Arc::new(SessionStore::new(store.clone()));
        let repo = IssueRepository::new(store, sessions);

        let issues = repo.get_all().await.unwrap();
        assert_eq!(issues.len(), 2);
    }

    #[test]
    fn test_seed_issues_wire_format() {
        let seeds = seed_issues().unwrap();
        let json = serde_json::to_string(&seeds).unwrap();
        assert!(json.contains("\"id\":\"RPT-1704067200000\""));
        assert!(json.contains("\"category\":\"Water Supply\""));
        assert!(json.contains("\"status\":\"In Progress\""));
        assert!(json.contains("\"reportedOn\":\"2025-12-01T10:00:00Z\""));
    }
}
