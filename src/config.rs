// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{AuditError, Result};
use crate::utils::validation::Validator;
use dotenvy::dotenv;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";
pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_RETENTION_DAYS: u32 = 90;
/// One hundred years.
pub const MAX_RETENTION_DAYS: u32 = 36_500;

const ENV_PREFIX: &str = "REPO_AUDIT";
const TOKEN_VAR: &str = "GITHUB_TOKEN";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub github: GithubConfig,
    #[serde(default)]
    pub audit: AuditPolicy,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GithubConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default)]
    pub token: Secret,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Whole-request timeout. Unset means the transport waits indefinitely.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuditPolicy {
    #[serde(default)]
    pub organization: String,
    #[serde(default = "default_retention_days")]
    pub retention_days: u32,
    #[serde(default = "default_archive_stale")]
    pub archive_stale: bool,
}

/// Command line values layered over every other configuration source.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub organization: Option<String>,
    pub token: Option<String>,
    pub retention_days: Option<u32>,
}

/// Credential wrapper that never prints its value.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("Secret(<empty>)")
        } else {
            f.write_str("Secret(<redacted>)")
        }
    }
}

impl<'de> Deserialize<'de> for Secret {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        String::deserialize(deserializer).map(Secret)
    }
}

impl Serialize for Secret {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str("<redacted>")
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_user_agent() -> String {
    format!("repo_audit/{}", env!("CARGO_PKG_VERSION"))
}

fn default_per_page() -> u32 {
    100
}

fn default_max_pages() -> u32 {
    10
}

fn default_retention_days() -> u32 {
    DEFAULT_RETENTION_DAYS
}

fn default_archive_stale() -> bool {
    true
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            token: Secret::default(),
            user_agent: default_user_agent(),
            timeout_secs: None,
            per_page: default_per_page(),
            max_pages: default_max_pages(),
        }
    }
}

impl Default for AuditPolicy {
    fn default() -> Self {
        Self {
            organization: String::new(),
            retention_days: default_retention_days(),
            archive_stale: default_archive_stale(),
        }
    }
}

impl Config {
    /// Layers the optional TOML file, `.env`, `REPO_AUDIT__*` variables and
    /// command line overrides, then validates the result.
    pub fn load(path: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        dotenv().ok();
        let vars: config::Map<String, String> = std::env::vars().collect();
        Self::from_sources(path, overrides, vars)
    }

    /// Same layering as [`Config::load`] with the environment supplied by
    /// the caller. `GITHUB_TOKEN` is honored when no token override is given.
    pub fn from_sources(
        path: Option<&Path>,
        overrides: &Overrides,
        vars: config::Map<String, String>,
    ) -> Result<Self> {
        let token = overrides
            .token
            .clone()
            .or_else(|| vars.get(TOKEN_VAR).filter(|t| !t.trim().is_empty()).cloned());

        let mut builder = config::Config::builder();

        builder = match path {
            Some(path) => builder.add_source(config::File::from(path)),
            None => builder
                .add_source(config::File::from(Path::new(DEFAULT_CONFIG_PATH)).required(false)),
        };

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true)
                .source(Some(vars)),
        );

        builder = builder
            .set_override_option("audit.organization", overrides.organization.clone())
            .and_then(|b| b.set_override_option("github.token", token))
            .and_then(|b| {
                b.set_override_option(
                    "audit.retention_days",
                    overrides.retention_days.map(i64::from),
                )
            })
            .map_err(|e| AuditError::Config(e.to_string()))?;

        let settings = builder
            .build()
            .map_err(|e| AuditError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| AuditError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            github: GithubConfig::default(),
            audit: AuditPolicy::default(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.audit.organization.trim().is_empty() {
            return Err(AuditError::Config(
                "organization must be set (audit.organization or --org)".to_string(),
            ));
        }
        Validator::validate_login(&self.audit.organization)
            .map_err(|e| AuditError::Config(e.to_string()))?;

        if self.github.token.is_empty() {
            return Err(AuditError::Config(
                "API token must be set (github.token, GITHUB_TOKEN or --token)".to_string(),
            ));
        }

        Validator::validate_url(&self.github.api_url)
            .map_err(|e| AuditError::Config(e.to_string()))?;

        if self.audit.retention_days > MAX_RETENTION_DAYS {
            return Err(AuditError::Config(format!(
                "retention_days must be at most {}",
                MAX_RETENTION_DAYS
            )));
        }

        if self.github.per_page == 0 || self.github.per_page > 100 {
            return Err(AuditError::Config(
                "per_page must be between 1 and 100".to_string(),
            ));
        }

        if self.github.max_pages == 0 {
            return Err(AuditError::Config(
                "max_pages must be greater than 0".to_string(),
            ));
        }

        if self.github.timeout_secs == Some(0) {
            return Err(AuditError::Config(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
