// ABOUTME: Command-line configuration for keysmith
// ABOUTME: Parses flags/env fallbacks and resolves them into workflow settings

use clap::Parser;
use keysmith_ssh::{default_key_dir, KeyPaths, DEFAULT_KEY_NAME};
use std::path::PathBuf;

use crate::error::Result;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_TOKEN_ENV: &str = "GITHUB_TOKEN";
pub const DEFAULT_TITLE_PREFIX: &str = "SSH Key";

#[derive(Parser, Debug)]
#[command(
    name = "keysmith",
    version,
    about = "Create an ed25519 SSH key, load it into ssh-agent, and register it with GitHub"
)]
pub struct Cli {
    /// Email used as key comment and in the GitHub key title (prompted for when omitted)
    #[arg(long, short = 'e')]
    pub email: Option<String>,

    /// Directory the keypair is written to (defaults to ~/.ssh)
    #[arg(long, env = "KEYSMITH_KEY_DIR")]
    pub key_dir: Option<PathBuf>,

    /// File name of the private key; the public key gets a .pub suffix
    #[arg(long, default_value = DEFAULT_KEY_NAME)]
    pub key_name: String,

    /// Replace an existing keypair
    #[arg(long)]
    pub force: bool,

    /// Ask for the passphrase a second time
    #[arg(long)]
    pub confirm_passphrase: bool,

    /// Base URL of the GitHub REST API
    #[arg(long, env = "KEYSMITH_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Environment variable holding the GitHub token
    #[arg(long, default_value = DEFAULT_TOKEN_ENV)]
    pub token_env: String,

    /// Prefix of the key title shown on GitHub ("<prefix> for <email>")
    #[arg(long, default_value = DEFAULT_TITLE_PREFIX)]
    pub title_prefix: String,

    /// ssh-agent executable
    #[arg(long, default_value = "ssh-agent")]
    pub ssh_agent: String,

    /// ssh-add executable
    #[arg(long, default_value = "ssh-add")]
    pub ssh_add: String,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

/// Everything the workflow needs, with paths resolved.
#[derive(Debug, Clone)]
pub struct Settings {
    pub email: Option<String>,
    pub paths: KeyPaths,
    pub force: bool,
    pub token_env: String,
    pub title_prefix: String,
}

impl Settings {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let dir = match &cli.key_dir {
            Some(dir) => dir.clone(),
            None => default_key_dir()?,
        };

        Ok(Self {
            email: cli.email.clone(),
            paths: KeyPaths::new(dir, &cli.key_name),
            force: cli.force,
            token_env: cli.token_env.clone(),
            title_prefix: cli.title_prefix.clone(),
        })
    }
}
