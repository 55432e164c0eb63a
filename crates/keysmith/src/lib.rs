// ABOUTME: Library for keysmith: SSH key provisioning against ssh-agent and GitHub
// ABOUTME: Wires the CLI settings into the provisioning workflow

pub mod agent;
pub mod config;
pub mod error;
pub mod github;
pub mod log;
pub mod prompt;
pub mod workflow;

pub use config::{Cli, Settings};
pub use error::{ProvisionError, Result, UploadError};
pub use workflow::{Provisioned, Provisioner};

use agent::SshAgent;
use github::GitHubClient;
use prompt::TerminalPrompter;

/// Run the full provisioning workflow against the real terminal, agent, and API.
pub async fn run(cli: Cli) -> Result<Provisioned> {
    let settings = Settings::from_cli(&cli)?;
    let prompter = TerminalPrompter::new(cli.confirm_passphrase);
    let agent = SshAgent::new(cli.ssh_agent, cli.ssh_add);
    let registry = GitHubClient::new(&cli.api_url).map_err(ProvisionError::HttpClient)?;

    Provisioner::new(settings, prompter, agent, registry)
        .run()
        .await
}
