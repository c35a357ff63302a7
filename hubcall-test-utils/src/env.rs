//! Environment variable management for testing
//!
//! This module provides utilities for isolating the XDG config directory and
//! the `HUBCALL_*` / `GITHUB_TOKEN` variables during testing so that tests
//! never pick up the developer's real configuration.

use std::env;
use std::path::PathBuf;

use tempfile::TempDir;

/// Variables that are cleared for the lifetime of the guard
const ISOLATED_VARS: &[&str] = &[
  "HUBCALL_TOKEN",
  "GITHUB_TOKEN",
  "HUBCALL_USER_AGENT",
  "HUBCALL_BASE_URL",
  "HUBCALL_TIMEOUT_SECS",
  "HUBCALL_CONFIG",
];

/// A test environment that points `XDG_CONFIG_HOME` at a per-test temporary
/// directory and clears hubcall's environment overrides
pub struct EnvTestGuard {
  /// The temporary directory used as XDG config home
  pub temp_dir: TempDir,
  /// The original values of every variable this guard touched
  saved: Vec<(String, Option<String>)>,
}

impl Default for EnvTestGuard {
  fn default() -> Self {
    Self::new()
  }
}

impl EnvTestGuard {
  pub const XDG_CONFIG_HOME: &'static str = "XDG_CONFIG_HOME";

  /// Create a new isolated environment
  pub fn new() -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let config_home = temp_dir.path().join("config");
    std::fs::create_dir_all(&config_home).expect("Failed to create config directory");

    let mut saved = Vec::new();
    saved.push((Self::XDG_CONFIG_HOME.to_string(), env::var(Self::XDG_CONFIG_HOME).ok()));
    for var in ISOLATED_VARS {
      saved.push((var.to_string(), env::var(var).ok()));
    }

    unsafe {
      env::set_var(Self::XDG_CONFIG_HOME, &config_home);
      for var in ISOLATED_VARS {
        env::remove_var(var);
      }
    }

    Self { temp_dir, saved }
  }

  /// Set a variable for the lifetime of the guard
  pub fn set(&mut self, key: &str, value: &str) {
    if !self.saved.iter().any(|(saved_key, _)| saved_key == key) {
      self.saved.push((key.to_string(), env::var(key).ok()));
    }
    unsafe {
      env::set_var(key, value);
    }
  }

  /// Get the path to the XDG config directory
  pub fn config_home(&self) -> PathBuf {
    self.temp_dir.path().join("config")
  }
}

impl Drop for EnvTestGuard {
  fn drop(&mut self) {
    for (key, value) in &self.saved {
      match value {
        Some(val) => unsafe {
          env::set_var(key, val);
        },
        None => unsafe {
          env::remove_var(key);
        },
      }
    }
  }
}
