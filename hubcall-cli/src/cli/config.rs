//! # Config Command
//!
//! Shows the effective client configuration, where it is read from, and
//! writes a starter configuration file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::{Args, Subcommand};
use hubcall_core::config::resolve_config_path;
use hubcall_core::consts::{DEFAULT_BASE_URL, ENV_TOKEN};
use hubcall_core::output::{format_command, mask_secret, print_header, print_info, print_success};
use hubcall_core::{ClientConfig, load_client_config};

/// Arguments for the config command
#[derive(Args)]
pub struct ConfigArgs {
  #[command(subcommand)]
  pub subcommand: ConfigSubcommands,
}

#[derive(Subcommand)]
pub enum ConfigSubcommands {
  /// Show the effective configuration, with the token masked
  Show,

  /// Print the path of the configuration file
  Path,

  /// Write a starter configuration file
  Init {
    /// User-Agent to put in the file; GitHub asks for your username
    #[arg(long = "user-agent", value_name = "NAME")]
    user_agent: Option<String>,

    /// Overwrite an existing file
    #[arg(long)]
    force: bool,
  },
}

/// Handle the config command
pub(super) fn handle_config_command(args: ConfigArgs, config_file: Option<&Path>) -> Result<()> {
  match args.subcommand {
    ConfigSubcommands::Show => handle_show_command(config_file),
    ConfigSubcommands::Path => {
      println!("{}", resolve_config_path(config_file)?.display());
      Ok(())
    }
    ConfigSubcommands::Init { user_agent, force } => handle_init_command(config_file, user_agent, force),
  }
}

fn handle_show_command(config_file: Option<&Path>) -> Result<()> {
  let path = resolve_config_path(config_file)?;
  let config = load_client_config(config_file)?;

  print_header("Configuration");
  let state = if path.exists() { "" } else { " (not found, using defaults)" };
  println!("  File:       {}{state}", path.display());
  println!("  Base URL:   {}", config.base_url());
  println!("  User-Agent: {}", config.user_agent());
  match config.token() {
    Some(token) => println!("  Token:      {}", mask_secret(token)),
    None => println!("  Token:      (not set, requests are unauthenticated)"),
  }
  match config.timeout() {
    Some(timeout) => println!("  Timeout:    {}s", timeout.as_secs()),
    None => println!("  Timeout:    (none)"),
  }

  Ok(())
}

fn handle_init_command(config_file: Option<&Path>, user_agent: Option<String>, force: bool) -> Result<()> {
  let path = resolve_config_path(config_file)?;
  if path.exists() && !force {
    bail!(
      "Configuration file {} already exists. Use --force to overwrite it.",
      path.display()
    );
  }

  if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
    fs::create_dir_all(parent).with_context(|| format!("Failed to create config directory {}", parent.display()))?;
  }
  fs::write(&path, starter_config(user_agent)?)
    .with_context(|| format!("Failed to write configuration to {}", path.display()))?;

  print_success(&format!("Wrote configuration to {}", path.display()));
  print_info(&format!(
    "Add a token with oauth_token or export {}, then try {}",
    ENV_TOKEN,
    format_command("hubcall cmd current-user")
  ));

  Ok(())
}

fn starter_config(user_agent: Option<String>) -> Result<String> {
  let mut content = String::from("# hubcall client configuration\n\n# oauth_token = \"ghp_...\"\n");
  match user_agent {
    Some(user_agent) => content.push_str(&ClientConfig::default().with_user_agent(user_agent).to_toml_string()?),
    None => content.push_str("# user_agent = \"your-github-username\"\n"),
  }
  content.push_str(&format!("# base_url = \"{DEFAULT_BASE_URL}\"\n# timeout_secs = 30\n"));
  Ok(content)
}
