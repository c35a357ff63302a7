//! Configuration directory management for testing
//!
//! This module provides a temporary configuration directory, optionally
//! pre-populated with a `config.toml`, that is removed when dropped.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// File name the hubcall configuration is stored under
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// RAII guard for a temporary configuration directory
pub struct ConfigDirTestGuard {
  temp_dir: TempDir,
}

impl Default for ConfigDirTestGuard {
  fn default() -> Self {
    Self::new()
  }
}

impl ConfigDirTestGuard {
  /// Create an empty configuration directory
  pub fn new() -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    Self { temp_dir }
  }

  /// Create a configuration directory containing a `config.toml` with the
  /// given content
  pub fn with_config(content: &str) -> Self {
    let guard = Self::new();
    guard.write_config(content);
    guard
  }

  /// Overwrite the `config.toml` in this directory
  pub fn write_config(&self, content: &str) {
    fs::write(self.config_path(), content).expect("Failed to write test config file");
  }

  /// Get the configuration directory
  pub fn config_dir(&self) -> &Path {
    self.temp_dir.path()
  }

  /// Get the path to the configuration file
  pub fn config_path(&self) -> PathBuf {
    self.temp_dir.path().join(CONFIG_FILE_NAME)
  }
}
