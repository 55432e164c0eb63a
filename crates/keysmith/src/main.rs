// ABOUTME: Entry point for the keysmith provisioning tool
// ABOUTME: Creates an SSH key, loads it into ssh-agent, and registers it with GitHub

use anyhow::Result;
use clap::Parser;
use keysmith::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    keysmith::log::init(cli.verbose);

    keysmith::run(cli).await?;
    Ok(())
}
