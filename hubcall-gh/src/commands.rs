//! # Command Registry
//!
//! A fixed table of named API calls that can be invoked from untrusted string
//! input (the `hubcall cmd` subcommand). Every name maps to a typed parser
//! that converts the string arguments once and produces a [`Command`]. Names
//! that are not in the table are rejected; nothing is looked up dynamically.

use std::num::NonZeroU32;

use anyhow::{Context, Result, anyhow, bail};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::client::GitHubClient;

/// One entry of the registry
#[derive(Debug, Clone, Copy)]
pub struct CommandSpec {
  pub name: &'static str,
  /// Alternative names, kept for the camelCase method names of older callers
  pub aliases: &'static [&'static str],
  /// Usage string for the positional arguments, e.g. `<owner> <repo> [page]`
  pub args: &'static str,
  pub about: &'static str,
  min_args: usize,
  max_args: usize,
  parser: fn(&[String]) -> Result<Command>,
}

impl CommandSpec {
  /// Whether `name` refers to this command
  pub fn matches(&self, name: &str) -> bool {
    self.name == name || self.aliases.contains(&name)
  }

  /// One-line usage, e.g. `repo-events <owner> <repo> [page]`
  pub fn usage(&self) -> String {
    if self.args.is_empty() {
      self.name.to_string()
    } else {
      format!("{} {}", self.name, self.args)
    }
  }

  fn parse(&self, args: &[String]) -> Result<Command> {
    if args.len() < self.min_args || args.len() > self.max_args {
      bail!(
        "'{}' takes {} but got {}. Usage: {}",
        self.name,
        arity(self.min_args, self.max_args),
        args.len(),
        self.usage()
      );
    }
    (self.parser)(args).with_context(|| format!("Usage: {}", self.usage()))
  }
}

fn arity(min: usize, max: usize) -> String {
  match (min, max) {
    (0, 0) => "no arguments".to_string(),
    (min, max) if min == max => format!("{min} argument(s)"),
    (min, max) => format!("{min} to {max} arguments"),
  }
}

/// Every command that can be invoked by name
pub const COMMANDS: &[CommandSpec] = &[
  CommandSpec {
    name: "api-endpoints",
    aliases: &["getApiEndpoints"],
    args: "",
    about: "Hypermedia index of the API root",
    min_args: 0,
    max_args: 0,
    parser: |_| Ok(Command::ApiEndpoints),
  },
  CommandSpec {
    name: "current-user",
    aliases: &["current_user_url"],
    args: "",
    about: "The authenticated user",
    min_args: 0,
    max_args: 0,
    parser: |_| Ok(Command::CurrentUser),
  },
  CommandSpec {
    name: "user",
    aliases: &["getUser"],
    args: "<username>",
    about: "A user by login",
    min_args: 1,
    max_args: 1,
    parser: |args| {
      Ok(Command::User {
        username: args[0].clone(),
      })
    },
  },
  CommandSpec {
    name: "user-repos",
    aliases: &["getUserRepos"],
    args: "<username> [page]",
    about: "Public repositories of a user",
    min_args: 1,
    max_args: 2,
    parser: |args| {
      Ok(Command::UserRepos {
        username: args[0].clone(),
        page: optional_page(args, 1)?,
      })
    },
  },
  CommandSpec {
    name: "events",
    aliases: &["getEvents"],
    args: "[page]",
    about: "Public events",
    min_args: 0,
    max_args: 1,
    parser: |args| {
      Ok(Command::Events {
        page: optional_page(args, 0)?,
      })
    },
  },
  CommandSpec {
    name: "repo-events",
    aliases: &["getRepositoryEvents"],
    args: "<owner> <repo> [page]",
    about: "Events of a repository",
    min_args: 2,
    max_args: 3,
    parser: |args| {
      Ok(Command::RepositoryEvents {
        owner: args[0].clone(),
        repo: args[1].clone(),
        page: optional_page(args, 2)?,
      })
    },
  },
  CommandSpec {
    name: "issue-events",
    aliases: &["getRepositoryIssuesEvents"],
    args: "<owner> <repo> [page]",
    about: "Issue events of a repository",
    min_args: 2,
    max_args: 3,
    parser: |args| {
      Ok(Command::RepositoryIssueEvents {
        owner: args[0].clone(),
        repo: args[1].clone(),
        page: optional_page(args, 2)?,
      })
    },
  },
  CommandSpec {
    name: "network-events",
    aliases: &["getNetworkRepositoryEvents"],
    args: "<owner> <repo> [page]",
    about: "Public events for a network of repositories",
    min_args: 2,
    max_args: 3,
    parser: |args| {
      Ok(Command::NetworkEvents {
        owner: args[0].clone(),
        repo: args[1].clone(),
        page: optional_page(args, 2)?,
      })
    },
  },
  CommandSpec {
    name: "org-events",
    aliases: &["getOrganisationEvents", "getOrganizationEvents"],
    args: "<org> [page]",
    about: "Public events of an organization",
    min_args: 1,
    max_args: 2,
    parser: |args| {
      Ok(Command::OrganizationEvents {
        org: args[0].clone(),
        page: optional_page(args, 1)?,
      })
    },
  },
  CommandSpec {
    name: "received-events",
    aliases: &["getReceivedUserEvents"],
    args: "<username> [public-only] [page]",
    about: "Events a user has received, optionally only the public ones",
    min_args: 1,
    max_args: 3,
    parser: |args| {
      Ok(Command::ReceivedEvents {
        username: args[0].clone(),
        public_only: args.get(1).map(|arg| parse_bool_arg(arg)).transpose()?.unwrap_or(false),
        page: optional_page(args, 2)?,
      })
    },
  },
  CommandSpec {
    name: "received-public-events",
    aliases: &["getReceivedPublicUserEvents"],
    args: "<username> [page]",
    about: "Public events a user has received",
    min_args: 1,
    max_args: 2,
    parser: |args| {
      Ok(Command::ReceivedEvents {
        username: args[0].clone(),
        public_only: true,
        page: optional_page(args, 1)?,
      })
    },
  },
  CommandSpec {
    name: "is-starred",
    aliases: &["isRepositoryStarred"],
    args: "<owner> <repo>",
    about: "Whether the authenticated user starred a repository",
    min_args: 2,
    max_args: 2,
    parser: |args| {
      Ok(Command::IsStarred {
        owner: args[0].clone(),
        repo: args[1].clone(),
      })
    },
  },
  CommandSpec {
    name: "is-merged",
    aliases: &["isPullRequestMerged"],
    args: "<owner> <repo> <number>",
    about: "Whether a pull request has been merged",
    min_args: 3,
    max_args: 3,
    parser: |args| {
      let number = args[2]
        .trim()
        .trim_start_matches('#')
        .parse::<u64>()
        .with_context(|| format!("Invalid pull request number '{}'", args[2]))?;
      Ok(Command::IsMerged {
        owner: args[0].clone(),
        repo: args[1].clone(),
        number,
      })
    },
  },
];

/// A parsed, typed invocation of a registry command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
  ApiEndpoints,
  CurrentUser,
  User {
    username: String,
  },
  UserRepos {
    username: String,
    page: Option<NonZeroU32>,
  },
  Events {
    page: Option<NonZeroU32>,
  },
  RepositoryEvents {
    owner: String,
    repo: String,
    page: Option<NonZeroU32>,
  },
  RepositoryIssueEvents {
    owner: String,
    repo: String,
    page: Option<NonZeroU32>,
  },
  NetworkEvents {
    owner: String,
    repo: String,
    page: Option<NonZeroU32>,
  },
  OrganizationEvents {
    org: String,
    page: Option<NonZeroU32>,
  },
  ReceivedEvents {
    username: String,
    public_only: bool,
    page: Option<NonZeroU32>,
  },
  IsStarred {
    owner: String,
    repo: String,
  },
  IsMerged {
    owner: String,
    repo: String,
    number: u64,
  },
}

impl Command {
  /// Look up `name` in [`COMMANDS`] and parse its arguments
  pub fn parse(name: &str, args: &[String]) -> Result<Command> {
    let spec = find_command(name).ok_or_else(|| {
      anyhow!("Unknown command '{name}'. Run 'hubcall commands' to list the available commands.")
    })?;
    debug!(command = spec.name, ?args, "Parsing registry command");
    spec.parse(args)
  }

  /// Run the command and return its result as JSON
  #[instrument(skip(client), level = "debug")]
  pub async fn execute(&self, client: &GitHubClient) -> Result<Value> {
    match self {
      Command::ApiEndpoints => Ok(Value::Object(client.get_api_endpoints().await?)),
      Command::CurrentUser => to_json(client.get_current_user().await?),
      Command::User { username } => to_json(client.get_user(username).await?),
      Command::UserRepos { username, page } => to_json(client.get_user_repos(username, *page).await?),
      Command::Events { page } => to_json(client.get_events(*page).await?),
      Command::RepositoryEvents { owner, repo, page } => {
        to_json(client.get_repository_events(owner, repo, *page).await?)
      }
      Command::RepositoryIssueEvents { owner, repo, page } => {
        to_json(client.get_repository_issue_events(owner, repo, *page).await?)
      }
      Command::NetworkEvents { owner, repo, page } => to_json(client.get_network_events(owner, repo, *page).await?),
      Command::OrganizationEvents { org, page } => to_json(client.get_organization_events(org, *page).await?),
      Command::ReceivedEvents {
        username,
        public_only: true,
        page,
      } => to_json(client.get_received_public_events(username, *page).await?),
      Command::ReceivedEvents {
        username,
        public_only: false,
        page,
      } => to_json(client.get_received_events(username, *page).await?),
      Command::IsStarred { owner, repo } => Ok(Value::Bool(client.is_repository_starred(owner, repo).await?)),
      Command::IsMerged { owner, repo, number } => {
        Ok(Value::Bool(client.is_pull_request_merged(owner, repo, *number).await?))
      }
    }
  }
}

/// Find a registry entry by name or alias
pub fn find_command(name: &str) -> Option<&'static CommandSpec> {
  COMMANDS.iter().find(|spec| spec.matches(name))
}

/// Convert a string flag into a `bool`. Accepts true/false, 1/0 and yes/no in
/// any case.
pub fn parse_bool_arg(value: &str) -> Result<bool> {
  match value.trim().to_ascii_lowercase().as_str() {
    "true" | "1" | "yes" => Ok(true),
    "false" | "0" | "no" => Ok(false),
    _ => bail!("Invalid boolean '{value}', expected true/false, 1/0 or yes/no"),
  }
}

/// Convert a page argument into a positive page number
pub fn parse_page_arg(value: &str) -> Result<NonZeroU32> {
  value
    .trim()
    .parse::<NonZeroU32>()
    .with_context(|| format!("Invalid page '{value}', expected a positive integer"))
}

fn optional_page(args: &[String], index: usize) -> Result<Option<NonZeroU32>> {
  args.get(index).map(|arg| parse_page_arg(arg)).transpose()
}

fn to_json<T: Serialize>(value: T) -> Result<Value> {
  serde_json::to_value(value).context("Failed to serialize command result")
}
