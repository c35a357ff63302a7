//! # Hubcall Core Library
//!
//! Shared building blocks for the hubcall crates: the client configuration
//! and where it is loaded from, environment variable names, and the colored
//! terminal output helpers used by the CLI.

pub mod config;
pub mod consts;
pub mod output;

pub use config::{ClientConfig, ConfigDirs, get_config_dirs, load_client_config};
pub use output::{ColorMode, print_error, print_info, print_success, print_warning};
