//! Issue tracking domain model and subsystems
//!
//! An [`Issue`] is a single community-reported problem record tracked
//! through the Pending / In Progress / Resolved workflow. Issues are owned
//! by the [`IssueRepository`], which is the sole writer to persisted state;
//! comments and upvotes are realized as whole-record updates through it.
//!
//! Persisted records use the camelCase JSON field names of the original
//! community tracker (`reporterName`, `reportedOn`, `resolvedOn`, ...), so
//! stores written by it deserialize unchanged.

/// Comment and upvote operations, built on the repository update path
pub mod engagement;
/// Persisted issue collection: create, read-all, update-by-id
pub mod repository;
/// Deterministic ordering of issues for display
pub mod sort;
/// The status state machine and its transition side effects
pub mod workflow;

pub use repository::IssueRepository;
pub use sort::sort_for_display;
pub use workflow::apply_status;

use crate::error::{CivicReportError, Result};
use crate::Role;
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Type-safe wrapper for issue ids to prevent mixing with other strings
///
/// Generated ids follow the `RPT-<unix-millis>-<disambiguator>` format: a
/// monotonically-distinguishing creation timestamp plus a random suffix.
/// Collisions are still possible and are treated as a repository error,
/// never a silent overwrite.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IssueId(String);

impl IssueId {
    /// Generate a new id from the current time plus a random disambiguator
    pub fn generate() -> Self {
        let millis = Utc::now().timestamp_millis();
        let disambiguator = rand::thread_rng().gen_range(0..1000);
        Self(format!("RPT-{millis}-{disambiguator}"))
    }

    /// Create an id from an existing token
    pub fn from_string(id: String) -> Result<Self> {
        if id.trim().is_empty() {
            return Err(CivicReportError::Validation(
                "issue id must not be empty".to_string(),
            ));
        }
        Ok(Self(id))
    }

    /// Get the raw string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for IssueId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for IssueId {
    type Err = CivicReportError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_string(s.to_string())
    }
}

/// Fixed enumeration of issue categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    /// Road damage, potholes, blocked drainage
    Roads,
    /// Refuse collection and dumping
    #[serde(rename = "Waste Disposal")]
    WasteDisposal,
    /// Electricity supply failures
    #[serde(rename = "Power Outages")]
    PowerOutages,
    /// Water supply faults and leakages
    #[serde(rename = "Water Supply")]
    WaterSupply,
    /// Safety and security concerns
    Security,
    /// Anything that fits no other category
    Other,
}

impl Category {
    /// All categories, in display order
    pub const ALL: [Category; 6] = [
        Category::Roads,
        Category::WasteDisposal,
        Category::PowerOutages,
        Category::WaterSupply,
        Category::Security,
        Category::Other,
    ];

    /// Display name, identical to the persisted form
    pub fn name(&self) -> &'static str {
        match self {
            Category::Roads => "Roads",
            Category::WasteDisposal => "Waste Disposal",
            Category::PowerOutages => "Power Outages",
            Category::WaterSupply => "Water Supply",
            Category::Security => "Security",
            Category::Other => "Other",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for Category {
    type Err = CivicReportError;

    fn from_str(s: &str) -> Result<Self> {
        Category::ALL
            .iter()
            .find(|category| category.name().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| CivicReportError::Validation(format!("unknown category: {s}")))
    }
}

/// Lifecycle status of an issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    /// Reported, awaiting triage
    Pending,
    /// Being worked on
    #[serde(rename = "In Progress")]
    InProgress,
    /// Work completed
    Resolved,
}

impl Status {
    /// Ordering rank for display: Pending first, Resolved last
    pub fn rank(&self) -> u8 {
        match self {
            Status::Pending => 1,
            Status::InProgress => 2,
            Status::Resolved => 3,
        }
    }

    /// Display name, identical to the persisted form
    pub fn name(&self) -> &'static str {
        match self {
            Status::Pending => "Pending",
            Status::InProgress => "In Progress",
            Status::Resolved => "Resolved",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for Status {
    type Err = CivicReportError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Status::Pending),
            "in progress" | "in-progress" | "inprogress" => Ok(Status::InProgress),
            "resolved" => Ok(Status::Resolved),
            other => Err(CivicReportError::Validation(format!(
                "unknown status: {other}"
            ))),
        }
    }
}

/// Reported coordinates, optionally with a human-readable address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lng: f64,
    /// Free-form address text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// A single discussion entry on an issue
///
/// Comments are immutable once appended and owned exclusively by their
/// parent issue. `comment_id` is assigned as the parent's comment count plus
/// one at append time, so it is only unique within the parent's comment list
/// as of assignment; it would collide if comments were ever deleted or
/// merged from multiple sources. This engine never does either.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Position-derived id, local to the parent issue
    #[serde(default)]
    pub comment_id: u32,
    /// Display name of the commenter
    pub author: String,
    /// Comment body, non-empty after trimming
    pub text: String,
    /// When the comment was appended
    pub timestamp: DateTime<Utc>,
    /// Role the commenter held when commenting
    #[serde(default)]
    pub role: Role,
}

/// A community-reported problem record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// Globally unique, immutable identifier
    pub id: IssueId,
    /// Display name of the reporter ("Anonymous" when reported without a session)
    pub reporter_name: String,
    /// Short summary of the problem
    pub title: String,
    /// Category from the fixed enumeration
    pub category: Category,
    /// Detailed description
    pub description: String,
    /// Where the problem is
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    /// Link to supporting media
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    /// Current workflow status
    pub status: Status,
    /// When the issue was reported
    pub reported_on: DateTime<Utc>,
    /// When the issue was resolved; set if and only if status is Resolved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_on: Option<DateTime<Utc>>,
    /// Monotonic upvote counter
    pub upvotes: u32,
    /// Append-only discussion thread
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// A citizen submission before the repository assigns its derived fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueDraft {
    /// Short summary of the problem
    pub title: String,
    /// Category from the fixed enumeration
    pub category: Category,
    /// Detailed description
    pub description: String,
    /// Where the problem is
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    /// Link to supporting media
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
}

impl IssueDraft {
    /// Create a draft with the required fields
    pub fn new(
        title: impl Into<String>,
        category: Category,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            category,
            description: description.into(),
            location: None,
            media_url: None,
        }
    }

    /// Attach a location
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Attach a media URL
    pub fn with_media_url(mut self, media_url: impl Into<String>) -> Self {
        self.media_url = Some(media_url.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_id_generate_format() {
        let id = IssueId::generate();
        let parts: Vec<&str> = id.as_str().splitn(3, '-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "RPT");
        assert!(parts[1].parse::<i64>().is_ok(), "millis segment");
        assert!(parts[2].parse::<u32>().unwrap() < 1000, "disambiguator");
    }

    #[test]
    fn test_issue_id_from_string() {
        // Seed ids have no random suffix; both shapes must be accepted
        let id = IssueId::from_string("RPT-1704067200000".to_string()).unwrap();
        assert_eq!(id.as_str(), "RPT-1704067200000");

        assert!(IssueId::from_string("  ".to_string()).is_err());
    }

    #[test]
    fn test_category_parse_and_display() {
        assert_eq!(
            "Waste Disposal".parse::<Category>().unwrap(),
            Category::WasteDisposal
        );
        assert_eq!("roads".parse::<Category>().unwrap(), Category::Roads);
        assert!("Potholes".parse::<Category>().is_err());
        assert_eq!(Category::PowerOutages.to_string(), "Power Outages");
    }

    #[test]
    fn test_category_wire_format() {
        let json = serde_json::to_string(&Category::WaterSupply).unwrap();
        assert_eq!(json, "\"Water Supply\"");
        let parsed: Category = serde_json::from_str("\"Water Supply\"").unwrap();
        assert_eq!(parsed, Category::WaterSupply);
    }

    #[test]
    fn test_status_rank_order() {
        assert!(Status::Pending.rank() < Status::InProgress.rank());
        assert!(Status::InProgress.rank() < Status::Resolved.rank());
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("In Progress".parse::<Status>().unwrap(), Status::InProgress);
        assert_eq!("in-progress".parse::<Status>().unwrap(), Status::InProgress);
        assert_eq!("resolved".parse::<Status>().unwrap(), Status::Resolved);
        assert!("Done".parse::<Status>().is_err());
    }

    #[test]
    fn test_issue_wire_format_is_camel_case() {
        let issue = Issue {
            id: IssueId::from_string("RPT-1".to_string()).unwrap(),
            reporter_name: "Anonymous".to_string(),
            title: "Test".to_string(),
            category: Category::Roads,
            description: "Desc".to_string(),
            location: None,
            media_url: None,
            status: Status::Pending,
            reported_on: Utc::now(),
            resolved_on: None,
            upvotes: 0,
            comments: vec![],
        };
        let json = serde_json::to_string(&issue).unwrap();
        assert!(json.contains("\"reporterName\""));
        assert!(json.contains("\"reportedOn\""));
        assert!(json.contains("\"status\":\"Pending\""));
        assert!(!json.contains("\"resolvedOn\""));
    }

    #[test]
    fn test_issue_deserializes_original_store_record() {
        // Record shape the original frontend wrote to its store, including
        // a comment without commentId/role
        let json = r#"{
            "id": "RPT-1704067200000",
            "reporterName": "Anonymous",
            "title": "Major Pothole near KASU Gate",
            "category": "Roads",
            "description": "Huge pothole.",
            "location": { "lat": 10.518, "lng": 7.433 },
            "status": "Pending",
            "reportedOn": "2025-12-01T10:00:00Z",
            "upvotes": 12,
            "comments": [{ "author": "Admin", "text": "Report acknowledged.", "timestamp": "2025-12-01T12:00:00Z" }],
            "mediaUrl": "https://example.test/pothole.jpg"
        }"#;
        let issue: Issue = serde_json::from_str(json).unwrap();
        assert_eq!(issue.status, Status::Pending);
        assert_eq!(issue.upvotes, 12);
        assert_eq!(issue.comments.len(), 1);
        assert_eq!(issue.comments[0].role, Role::Citizen);
        assert_eq!(issue.resolved_on, None);
    }
}
