// rulekeeper-core/src/infrastructure/config/client.rs

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};
use validator::Validate;

use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::http::transport::DEFAULT_BASE_URL;

/// Environment variable holding the backend base URL.
pub const BASE_URL_ENV: &str = "RULEKEEPER_API_BASE_URL";

const CONFIG_FILE_NAMES: [&str; 2] = ["rulekeeper.yaml", "rulekeeper.yml"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ClientConfig {
    #[validate(url(message = "api_base_url must be an absolute URL"))]
    #[serde(default = "default_base_url")]
    pub api_base_url: String,

    /// Backend bookkeeping tables hidden from listings.
    #[serde(default = "default_internal_tables")]
    pub internal_tables: Vec<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_base_url(),
            internal_tables: default_internal_tables(),
        }
    }
}

impl ClientConfig {
    /// Replaces the base URL (command-line flag) and re-validates.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Result<Self, InfrastructureError> {
        self.api_base_url = url.into();
        self.checked()
    }

    fn checked(self) -> Result<Self, InfrastructureError> {
        self.validate()
            .map_err(|e| InfrastructureError::ConfigError(e.to_string()))?;
        Ok(self)
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_internal_tables() -> Vec<String> {
    vec!["rules".to_string(), "rule_versions".to_string()]
}

/// Defaults, then `rulekeeper.yaml` in `dir` when present, then the
/// process environment.
pub fn load_client_config(dir: Option<&Path>) -> Result<ClientConfig, InfrastructureError> {
    load_client_config_with(dir, |key| std::env::var(key).ok())
}

/// [`load_client_config`] with an injected environment lookup.
#[instrument(skip(env))]
pub fn load_client_config_with<F>(
    dir: Option<&Path>,
    env: F,
) -> Result<ClientConfig, InfrastructureError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match dir.and_then(find_config_file) {
        Some(path) => {
            info!(path = ?path, "Loading client configuration");
            let content = fs::read_to_string(&path)?;
            serde_yaml::from_str(&content)?
        }
        None => ClientConfig::default(),
    };

    if let Some(url) = env(BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
        info!(old = %config.api_base_url, new = %url, "Overriding backend URL via ENV");
        config.api_base_url = url;
    }

    config.checked()
}

fn find_config_file(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|p| p.exists())
}
