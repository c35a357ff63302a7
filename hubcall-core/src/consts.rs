//! Core constants shared across hubcall components.

/// Root of the public GitHub REST API.
pub const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// User-Agent sent when none is configured. GitHub rejects requests without
/// one.
pub const DEFAULT_USER_AGENT: &str = "laravel-github";

/// Name of the configuration file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Environment variable holding the OAuth token.
pub const ENV_TOKEN: &str = "HUBCALL_TOKEN";

/// Fallback token variable, shared with the `gh` CLI and most CI systems.
pub const ENV_GITHUB_TOKEN: &str = "GITHUB_TOKEN";

/// Environment variable overriding the User-Agent header.
pub const ENV_USER_AGENT: &str = "HUBCALL_USER_AGENT";

/// Environment variable overriding the API root, e.g. for GitHub Enterprise.
pub const ENV_BASE_URL: &str = "HUBCALL_BASE_URL";

/// Environment variable overriding the per-request timeout, in seconds.
pub const ENV_TIMEOUT_SECS: &str = "HUBCALL_TIMEOUT_SECS";

/// Environment variable pointing at an explicit configuration file.
pub const ENV_CONFIG: &str = "HUBCALL_CONFIG";
