//! Configuration management for CivicReport
//!
//! Centralizes the store key names, data directory, and field limits with
//! environment variable overrides and sensible defaults.

const DEFAULT_ISSUES_KEY: &str = "COMMUNITY_ISSUES_DB";
const DEFAULT_SESSION_KEY: &str = "CURRENT_USER";
const DEFAULT_DATA_DIR: &str = ".civicreport";

/// Configuration settings for the CivicReport engine
#[derive(Debug, Clone)]
pub struct Config {
    /// Store key under which the issue collection is persisted
    pub issues_key: String,
    /// Store key under which the current session is persisted
    pub session_key: String,
    /// Directory name used by the default filesystem store
    pub data_dir: String,
    /// Maximum issue title length (default: 200)
    pub max_title_length: usize,
    /// Maximum issue description length (default: 5000)
    pub max_description_length: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            issues_key: DEFAULT_ISSUES_KEY.to_string(),
            session_key: DEFAULT_SESSION_KEY.to_string(),
            data_dir: DEFAULT_DATA_DIR.to_string(),
            max_title_length: 200,
            max_description_length: 5000,
        }
    }
}

impl Config {
    /// Create a new configuration, applying `CIVICREPORT_*` environment
    /// variable overrides on top of the defaults
    pub fn new() -> Self {
        let mut config = Self::default();
        if let Ok(key) = std::env::var("CIVICREPORT_ISSUES_KEY") {
            config.issues_key = key;
        }
        if let Ok(key) = std::env::var("CIVICREPORT_SESSION_KEY") {
            config.session_key = key;
        }
        if let Ok(dir) = std::env::var("CIVICREPORT_DATA_DIR") {
            config.data_dir = dir;
        }
        if let Ok(value) = std::env::var("CIVICREPORT_MAX_TITLE_LENGTH") {
            if let Ok(parsed) = value.parse() {
                config.max_title_length = parsed;
            }
        }
        if let Ok(value) = std::env::var("CIVICREPORT_MAX_DESCRIPTION_LENGTH") {
            if let Ok(parsed) = value.parse() {
                config.max_description_length = parsed;
            }
        }
        config
    }

    /// Get the global configuration instance
    pub fn global() -> &'static Self {
        static CONFIG: std::sync::OnceLock<Config> = std::sync::OnceLock::new();
        CONFIG.get_or_init(Config::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.issues_key, "COMMUNITY_ISSUES_DB");
        assert_eq!(config.session_key, "CURRENT_USER");
        assert_eq!(config.data_dir, ".civicreport");
        assert_eq!(config.max_title_length, 200);
    }

    #[test]
    fn test_global_config_is_stable() {
        let a = Config::global();
        let b = Config::global();
        assert_eq!(a.issues_key, b.issues_key);
    }
}
