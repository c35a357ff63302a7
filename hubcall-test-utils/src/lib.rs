//! Test utilities shared across the hubcall workspace
//!
//! This crate provides common testing infrastructure including:
//! - Temporary configuration directories ([`ConfigDirTestGuard`])
//! - XDG and `HUBCALL_*` environment isolation ([`EnvTestGuard`])
//!
//! The clippy dead_code lint is disabled for this crate because test utilities
//! may not be used by all tests, and the compiler cannot detect usage across
//! crate boundaries in development dependencies.

#![allow(dead_code)]

pub mod config;
pub mod env;

// Re-export commonly used items
pub use config::ConfigDirTestGuard;
pub use env::EnvTestGuard;
