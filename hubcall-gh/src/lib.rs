//! # GitHub API Client
//!
//! A thin client for the GitHub REST v3 API. Every call goes through one
//! request executor ([`GitHubClient::request`]) that returns the status code,
//! headers and decoded JSON body. [`Pagination`] reads the `Link` header of a
//! response. Typed endpoint wrappers and a name-based [`commands`] registry
//! are built on top of the executor.

pub mod client;
pub mod commands;
pub mod consts;
pub mod endpoints;
pub mod error;
pub mod models;
pub mod pagination;
pub mod query;
pub mod request;
pub mod response;

// Re-export the client
pub use client::{GitHubClient, create_github_client};
pub use commands::{COMMANDS, Command, CommandSpec};
pub use error::RequestError;
// Re-export models
pub use models::{Event, EventActor, EventRepo, GitHubUser, Page, Repository};
pub use pagination::{PageLink, Pagination};
pub use query::QueryBuilder;
pub use request::{EndpointRequest, HttpMethod};
pub use response::{ApiResponse, ResponseHeaders};
