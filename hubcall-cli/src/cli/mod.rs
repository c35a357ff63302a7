//! # Command Line Interface
//!
//! Defines the CLI structure and command handlers for the hubcall tool.

mod cmd;
mod config;
mod request;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::builder::Styles;
use clap::builder::styling::AnsiColor;
use clap::{ArgAction, Parser, Subcommand};
use hubcall_core::{ColorMode, load_client_config};
use hubcall_gh::{GitHubClient, create_github_client};
use tracing::debug;

/// Top-level CLI command for the hubcall tool
#[derive(Parser)]
#[command(name = "hubcall")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(about = "A thin command-line client for the GitHub REST API")]
#[command(
  long_about = "Hubcall sends requests to the GitHub REST v3 API and prints the status,\n\
        headers, Link-header pagination and JSON body of the response.\n\n\
        The token, User-Agent and API root are read from the config file and can\n\
        be overridden with HUBCALL_TOKEN (or GITHUB_TOKEN), HUBCALL_USER_AGENT,\n\
        HUBCALL_BASE_URL and HUBCALL_TIMEOUT_SECS."
)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(propagate_version = true)]
#[command(subcommand_required(true))]
#[command(disable_help_subcommand = true)]
#[command(max_term_width = 120)]
#[command(styles = Styles::styled()
    .header(AnsiColor::BrightGreen.on_default().bold().underline())
    .usage(AnsiColor::Green.on_default().bold())
    .literal(AnsiColor::BrightGreen.on_default().bold())
    .placeholder(AnsiColor::BrightWhite.on_default().italic())
    .valid(AnsiColor::Green.on_default())
    .invalid(AnsiColor::BrightRed.on_default().bold())
)]
pub struct Cli {
  /// Sets the level of verbosity (can be used multiple times)
  #[arg(
    short = 'v',
    long = "verbose",
    action = ArgAction::Count,
    global = true,
    long_help = "Sets the level of verbosity for tracing and logging output.\n\n\
             -v: Show info level messages\n\
             -vv: Show debug level messages\n\
             -vvv: Show trace level messages"
  )]
  pub verbose: u8,

  /// Controls when colored output is used
  #[arg(
    long,
    value_enum,
    ignore_case = true,
    global = true,
    default_value_t = ColorMode::Auto,
  )]
  pub colors: ColorMode,

  /// Read the configuration from this file instead of the default location
  #[arg(long = "config", value_name = "PATH", global = true)]
  pub config_file: Option<PathBuf>,

  /// Subcommands
  #[command(subcommand)]
  pub command: Commands,
}

/// Subcommands for the hubcall tool
#[derive(Subcommand)]
pub enum Commands {
  /// Send a request to an API path
  #[command(long_about = "Send a single request to the GitHub API and print the response.\n\n\
            The path is relative to the API root (e.g. 'users/octocat/repos') and may\n\
            carry its own query string. Absolute URLs are requested as given.\n\
            Non-2xx responses are printed like any other response.")]
  #[command(alias = "req")]
  Request(request::RequestArgs),

  /// Run a named command from the registry
  #[command(long_about = "Run one of the named API commands listed by 'hubcall commands'.\n\n\
            Arguments are positional and converted to their types before any\n\
            request is sent. The result is printed as JSON.")]
  Cmd(cmd::CmdArgs),

  /// List the commands available to 'hubcall cmd'
  #[command(name = "commands", alias = "ls")]
  List,

  /// Inspect or create the configuration file
  #[command(arg_required_else_help = true)]
  Config(config::ConfigArgs),
}

pub fn handle_cli(cli: Cli) -> Result<()> {
  cli.colors.apply();

  let config_file = cli.config_file.as_deref();
  match cli.command {
    Commands::Request(args) => request::handle_request_command(args, config_file),
    Commands::Cmd(args) => cmd::handle_cmd_command(args, config_file),
    Commands::List => cmd::handle_list_command(),
    Commands::Config(args) => config::handle_config_command(args, config_file),
  }
}

/// Build a client from the effective configuration
fn load_client(config_file: Option<&Path>) -> Result<GitHubClient> {
  let config = load_client_config(config_file)?;
  debug!(
    base_url = config.base_url(),
    authenticated = config.token().is_some(),
    "Loaded client configuration"
  );
  create_github_client(&config)
}
