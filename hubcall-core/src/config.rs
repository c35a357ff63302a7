//! # Configuration Management
//!
//! Client configuration for the GitHub API and where it comes from: an
//! optional TOML file in the XDG config directory, overlaid with environment
//! variables. The configuration is read once when a client is built and never
//! mutated afterwards.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::consts::{
  CONFIG_FILE_NAME, DEFAULT_BASE_URL, DEFAULT_USER_AGENT, ENV_BASE_URL, ENV_CONFIG, ENV_GITHUB_TOKEN,
  ENV_TIMEOUT_SECS, ENV_TOKEN, ENV_USER_AGENT,
};

/// Settings needed to talk to the GitHub REST API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
  /// Personal access or OAuth token. Empty means unauthenticated requests.
  #[serde(alias = "oAuthToken", skip_serializing_if = "Option::is_none")]
  pub oauth_token: Option<String>,

  /// User-Agent header value; GitHub asks for your username here
  #[serde(alias = "userAgent", skip_serializing_if = "Option::is_none")]
  pub user_agent: Option<String>,

  /// API root, only needed for GitHub Enterprise or testing
  #[serde(alias = "baseUrl", skip_serializing_if = "Option::is_none")]
  pub base_url: Option<String>,

  /// Per-request timeout in seconds; unset or zero disables it
  #[serde(alias = "timeoutSecs", skip_serializing_if = "Option::is_none")]
  pub timeout_secs: Option<u64>,
}

impl ClientConfig {
  /// Set the OAuth token
  pub fn with_token(mut self, token: impl Into<String>) -> Self {
    self.oauth_token = Some(token.into());
    self
  }

  /// Set the User-Agent
  pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
    self.user_agent = Some(user_agent.into());
    self
  }

  /// Set the API root
  pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
    self.base_url = Some(base_url.into());
    self
  }

  /// Set the per-request timeout
  pub fn with_timeout(mut self, timeout: Duration) -> Self {
    self.timeout_secs = Some(timeout.as_secs());
    self
  }

  /// The token to authenticate with, if a non-blank one is configured
  pub fn token(&self) -> Option<&str> {
    self
      .oauth_token
      .as_deref()
      .map(str::trim)
      .filter(|token| !token.is_empty())
  }

  /// The User-Agent to send, falling back to [`DEFAULT_USER_AGENT`]
  pub fn user_agent(&self) -> &str {
    self
      .user_agent
      .as_deref()
      .map(str::trim)
      .filter(|agent| !agent.is_empty())
      .unwrap_or(DEFAULT_USER_AGENT)
  }

  /// The API root, falling back to [`DEFAULT_BASE_URL`]
  pub fn base_url(&self) -> &str {
    self
      .base_url
      .as_deref()
      .map(str::trim)
      .filter(|url| !url.is_empty())
      .unwrap_or(DEFAULT_BASE_URL)
  }

  /// The per-request timeout, if one is configured
  pub fn timeout(&self) -> Option<Duration> {
    self.timeout_secs.filter(|secs| *secs > 0).map(Duration::from_secs)
  }

  /// Parse a configuration from TOML
  pub fn from_toml_str(content: &str) -> Result<Self> {
    toml::from_str(content).context("Failed to parse client configuration")
  }

  /// Serialize the configuration as pretty TOML
  pub fn to_toml_string(&self) -> Result<String> {
    toml::to_string_pretty(self).context("Failed to serialize client configuration to TOML")
  }

  /// Overlay values from the environment.
  ///
  /// `lookup` resolves a variable name to its value. Blank values are
  /// treated as unset. `HUBCALL_TOKEN` wins over `GITHUB_TOKEN`.
  pub fn apply_env<F>(mut self, lookup: F) -> Result<Self>
  where
    F: Fn(&str) -> Option<String>,
  {
    let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    if let Some(token) = get(ENV_TOKEN).or_else(|| get(ENV_GITHUB_TOKEN)) {
      self.oauth_token = Some(token);
    }
    if let Some(user_agent) = get(ENV_USER_AGENT) {
      self.user_agent = Some(user_agent);
    }
    if let Some(base_url) = get(ENV_BASE_URL) {
      self.base_url = Some(base_url);
    }
    if let Some(timeout) = get(ENV_TIMEOUT_SECS) {
      let secs = timeout
        .trim()
        .parse::<u64>()
        .with_context(|| format!("{ENV_TIMEOUT_SECS} must be a whole number of seconds, got '{timeout}'"))?;
      self.timeout_secs = Some(secs);
    }

    Ok(self)
  }
}

/// Represents the configuration directory for the hubcall application
#[derive(Debug, Clone)]
pub struct ConfigDirs {
  pub config_dir: PathBuf,
}

impl ConfigDirs {
  /// Resolve the platform configuration directory
  pub fn new() -> Result<Self> {
    let proj_dirs =
      ProjectDirs::from("eddieland", "", "hubcall").context("Failed to determine project directories")?;

    Ok(Self {
      config_dir: proj_dirs.config_dir().to_path_buf(),
    })
  }

  /// Use an explicit configuration directory
  pub fn with_config_dir(config_dir: impl Into<PathBuf>) -> Self {
    Self {
      config_dir: config_dir.into(),
    }
  }

  /// Get the path to the client configuration file
  pub fn config_path(&self) -> PathBuf {
    self.config_dir.join(CONFIG_FILE_NAME)
  }

  /// Load the client configuration file, or the default if there is none
  pub fn load_client_config(&self) -> Result<ClientConfig> {
    read_config_file(&self.config_path())
  }
}

/// Get the configuration directories
pub fn get_config_dirs() -> Result<ConfigDirs> {
  ConfigDirs::new()
}

/// Resolve which configuration file to read.
///
/// An explicit path wins, then `HUBCALL_CONFIG`, then the XDG location.
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf> {
  if let Some(path) = explicit {
    return Ok(path.to_path_buf());
  }
  if let Some(path) = std::env::var_os(ENV_CONFIG).filter(|path| !path.is_empty()) {
    return Ok(PathBuf::from(path));
  }
  Ok(get_config_dirs()?.config_path())
}

/// Load the effective client configuration: file first, then environment.
pub fn load_client_config(explicit: Option<&Path>) -> Result<ClientConfig> {
  let path = resolve_config_path(explicit)?;
  read_config_file(&path)?.apply_env(|key| std::env::var(key).ok())
}

fn read_config_file(path: &Path) -> Result<ClientConfig> {
  if !path.exists() {
    return Ok(ClientConfig::default());
  }

  let content =
    fs::read_to_string(path).with_context(|| format!("Failed to read client config from {}", path.display()))?;

  ClientConfig::from_toml_str(&content).with_context(|| format!("Invalid client config in {}", path.display()))
}
