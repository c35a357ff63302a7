//! Constants for the hubcall-gh client

/// Accept header value for the GitHub API
pub const ACCEPT: &str = "application/vnd.github.v3+json";

/// Prefix of the Authorization header value for OAuth tokens
pub const TOKEN_SCHEME: &str = "token";

/// Name of the pagination response header
pub const LINK_HEADER: &str = "link";

/// Query parameter carrying the page number
pub const PAGE_PARAM: &str = "page";

/// Query parameter carrying the page size
pub const PER_PAGE_PARAM: &str = "per_page";
