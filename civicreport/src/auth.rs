//! Credential directory and session store
//!
//! Authentication is a static credential lookup against a fixed directory of
//! users; there is no real authentication protocol. The session is a single
//! persisted `User` record: present means logged in, absent means logged out.
//! Malformed session data degrades to "not logged in" rather than failing.

use crate::config::Config;
use crate::error::Result;
use crate::store::KeyValueStore;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Role of a directory user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Community member: reports, discusses, upvotes
    Citizen,
    /// Administrator: additionally triages issues through the status workflow
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Citizen => write!(f, "citizen"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Citizen
    }
}

/// A directory user. Entries are immutable and defined at initialization;
/// users are never created or destroyed at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Login name
    pub username: String,
    /// Static credential the login attempt is matched against
    pub password: String,
    /// Role granted to the user
    pub role: Role,
    /// Name shown on reports and comments
    #[serde(rename = "name")]
    pub display_name: String,
}

/// Fixed mapping of username to directory user
#[derive(Debug, Clone)]
pub struct CredentialDirectory {
    users: HashMap<String, User>,
}

impl CredentialDirectory {
    /// Build a directory from a fixed set of users, keyed by username
    pub fn from_users(users: impl IntoIterator<Item = User>) -> Self {
        Self {
            users: users
                .into_iter()
                .map(|user| (user.username.clone(), user))
                .collect(),
        }
    }

    /// Look up a directory entry by username
    pub fn get(&self, username: &str) -> Option<&User> {
        self.users.get(username)
    }
}

impl Default for CredentialDirectory {
    fn default() -> Self {
        let mut users = HashMap::new();
        users.insert(
            "citizen".to_string(),
            User {
                username: "citizen".to_string(),
                password: "password".to_string(),
                role: Role::Citizen,
                display_name: "Nuhu Abdullahi".to_string(),
            },
        );
        users.insert(
            "admin".to_string(),
            User {
                username: "admin".to_string(),
                password: "password".to_string(),
                role: Role::Admin,
                display_name: "Admin".to_string(),
            },
        );
        Self { users }
    }
}

/// Session store holding the current authenticated user
///
/// The session lives under a single store key; login overwrites it, logout
/// removes it.
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
    directory: CredentialDirectory,
}

impl SessionStore {
    /// Create a session store over a key-value backend with the default
    /// credential directory
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            directory: CredentialDirectory::default(),
        }
    }

    /// Create a session store with a custom credential directory
    pub fn with_directory(store: Arc<dyn KeyValueStore>, directory: CredentialDirectory) -> Self {
        Self { store, directory }
    }

    /// Attempt a login. On an exact password match the user is persisted as
    /// the current session and returned; otherwise returns `None` and leaves
    /// any prior session untouched.
    pub async fn login(&self, username: &str, password: &str) -> Result<Option<User>> {
        let Some(user) = self.directory.get(username) else {
            debug!("Login failed: unknown username {}", username);
            return Ok(None);
        };
        if user.password != password {
            debug!("Login failed: wrong password for {}", username);
            return Ok(None);
        }

        let serialized = serde_json::to_string(user)?;
        self.store
            .set(&Config::global().session_key, serialized)
            .await?;
        debug!("User {} logged in", username);
        Ok(Some(user.clone()))
    }

    /// Clear the persisted session unconditionally
    pub async fn logout(&self) -> Result<()> {
        self.store.remove(&Config::global().session_key).await?;
        debug!("Session cleared");
        Ok(())
    }

    /// Read the current session. Returns `None` when no session is stored or
    /// the stored record is malformed.
    pub async fn current_user(&self) -> Result<Option<User>> {
        let Some(raw) = self.store.get(&Config::global().session_key).await? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                warn!("Malformed session record, treating as logged out: {}", e);
                Ok(None)
            }
        }
    }

    /// Whether a valid session is present
    pub async fn is_authenticated(&self) -> Result<bool> {
        Ok(self.current_user().await?.is_some())
    }

    /// Whether the current session belongs to an admin
    pub async fn is_admin(&self) -> Result<bool> {
        Ok(self
            .current_user()
            .await?
            .is_some_and(|user| user.role == Role::Admin))
    }
}
