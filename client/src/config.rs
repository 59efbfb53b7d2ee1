//! Configuration management for the Startup Planner client
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with PLANNER_ prefix

use std::path::PathBuf;

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main client configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Planner API configuration
    pub api: ApiConfig,

    /// Session cookies forwarded to the API
    #[serde(default)]
    pub session: SessionConfig,

    /// Local persistence configuration
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Origin serving the `/api` routes
    pub base_url: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SessionConfig {
    /// Value of the `sessionid` cookie
    pub session_id: Option<String>,

    /// Value of the `csrftoken` cookie
    pub csrf_token: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct StorageConfig {
    /// JSON file holding the selected business and preferences
    pub path: Option<PathBuf>,
}

impl StorageConfig {
    /// Configured path, or `<data dir>/startup-planner/storage.json`
    pub fn resolved_path(&self) -> Option<PathBuf> {
        self.path.clone().or_else(|| {
            dirs::data_dir().map(|dir| dir.join("startup-planner").join("storage.json"))
        })
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("PLANNER_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("api.base_url", "http://localhost:3000")?
            .set_default("api.timeout_secs", 30)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (PLANNER_ prefix)
            .add_source(
                Environment::with_prefix("PLANNER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            timeout_secs: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_storage_path_wins() {
        let storage = StorageConfig {
            path: Some(PathBuf::from("/tmp/planner.json")),
        };
        assert_eq!(storage.resolved_path(), Some(PathBuf::from("/tmp/planner.json")));
    }

    #[test]
    fn test_api_defaults() {
        let api = ApiConfig::default();
        assert_eq!(api.base_url, "http://localhost:3000");
        assert_eq!(api.timeout_secs, 30);
    }
}
