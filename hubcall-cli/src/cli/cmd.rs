//! # Registry Commands
//!
//! `hubcall cmd <name> [args...]` runs a named command from the registry and
//! `hubcall commands` lists them.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use hubcall_core::output::{format_command, print_header};
use hubcall_gh::{COMMANDS, Command};
use owo_colors::OwoColorize;
use tokio::runtime::Runtime;
use tracing::info;

use super::load_client;

/// Arguments for the cmd command
#[derive(Args)]
pub struct CmdArgs {
  /// Command name, see 'hubcall commands'
  #[arg(required = true, index = 1)]
  pub name: String,

  /// Positional arguments for the command
  #[arg(index = 2, trailing_var_arg = true, allow_hyphen_values = true)]
  pub args: Vec<String>,
}

/// Handle the cmd command
pub(super) fn handle_cmd_command(args: CmdArgs, config_file: Option<&Path>) -> Result<()> {
  // Reject unknown names and bad arguments before touching the network
  let command = Command::parse(&args.name, &args.args)?;
  info!(?command, "Running registry command");

  let client = load_client(config_file)?;
  let rt = Runtime::new()?;
  let result = rt.block_on(command.execute(&client))?;

  let output = serde_json::to_string_pretty(&result).context("Failed to format command result")?;
  println!("{output}");

  Ok(())
}

/// Handle the commands listing
pub(super) fn handle_list_command() -> Result<()> {
  print_header("Available commands");

  let width = COMMANDS.iter().map(|spec| spec.usage().len()).max().unwrap_or_default();
  for spec in COMMANDS {
    // Pad before coloring, escape codes would count towards the width
    let usage = format!("{:<width$}", spec.usage());
    println!("  {}  {}", format_command(&usage), spec.about);
    if !spec.aliases.is_empty() {
      println!("  {:<width$}  {}", "", format!("aliases: {}", spec.aliases.join(", ")).bright_black());
    }
  }

  Ok(())
}
