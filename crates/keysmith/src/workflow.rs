// ABOUTME: The provisioning run, from prompts to GitHub upload
// ABOUTME: Each step finishes or aborts the run; files already written stay on disk

use colored::Colorize;
use keysmith_ssh::{compute_fingerprint, generate_keypair, seal_keypair, write_keypair};
use rand::rngs::OsRng;
use std::path::PathBuf;

use crate::agent::KeyAgent;
use crate::config::Settings;
use crate::error::{ProvisionError, Result};
use crate::github::{KeyRegistration, KeyRegistry};
use crate::prompt::Prompter;

/// What a successful run leaves behind.
#[derive(Debug, Clone)]
pub struct Provisioned {
    pub private_key: PathBuf,
    pub public_key: PathBuf,
    pub fingerprint: String,
    pub auth_sock: Option<String>,
}

pub struct Provisioner<P, A, R> {
    settings: Settings,
    prompter: P,
    agent: A,
    registry: R,
}

impl<P, A, R> Provisioner<P, A, R>
where
    P: Prompter,
    A: KeyAgent,
    R: KeyRegistry,
{
    pub fn new(settings: Settings, prompter: P, agent: A, registry: R) -> Self {
        Self {
            settings,
            prompter,
            agent,
            registry,
        }
    }

    pub async fn run(&self) -> Result<Provisioned> {
        let paths = &self.settings.paths;

        if !self.settings.force {
            for path in [&paths.private_key, &paths.public_key] {
                if path.exists() {
                    return Err(ProvisionError::KeyExists { path: path.clone() });
                }
            }
        }

        println!("{}", "SSH Key Provisioning".bold());
        println!();

        let email = match &self.settings.email {
            Some(email) => email.clone(),
            None => self.prompter.identity()?,
        };
        let passphrase = self.prompter.passphrase()?;

        println!("{} Generating ed25519 key...", "[1/5]".dimmed());
        let key = generate_keypair(&mut OsRng, &email)?;
        let sealed = seal_keypair(key, &mut OsRng, passphrase.as_bytes())?;
        let fingerprint = compute_fingerprint(sealed.public_key())?;
        println!("  Fingerprint: {}", fingerprint.dimmed());

        println!(
            "{} Writing keypair to {}...",
            "[2/5]".dimmed(),
            paths.dir.display()
        );
        write_keypair(paths, &sealed)?;

        println!("{} Starting ssh-agent...", "[3/5]".dimmed());
        let agent_env = self.agent.start()?;
        agent_env.apply();

        println!("{} Adding key to ssh-agent...", "[4/5]".dimmed());
        self.agent.add_key(&paths.private_key, &passphrase)?;
        drop(passphrase);

        println!("{} Registering key with GitHub...", "[5/5]".dimmed());
        let token = std::env::var(&self.settings.token_env)
            .ok()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ProvisionError::MissingToken {
                var: self.settings.token_env.clone(),
            })?;

        let registration =
            KeyRegistration::new(&self.settings.title_prefix, &email, sealed.authorized_key());
        self.registry
            .register(&token, &registration)
            .await
            .map_err(|source| ProvisionError::Upload {
                source,
                public_key_path: paths.public_key.clone(),
            })?;

        println!();
        println!("{}", "Key added successfully".green().bold());
        println!();
        println!("  Private key: {}", paths.private_key.display());
        println!("  Public key:  {}", paths.public_key.display());
        println!("  Fingerprint: {}", fingerprint);
        if let Some(sock) = agent_env.auth_sock() {
            println!();
            println!("  Load the agent in your shell with:");
            println!("    {}", format!("export SSH_AUTH_SOCK={sock}").cyan());
        }
        println!();

        Ok(Provisioned {
            private_key: paths.private_key.clone(),
            public_key: paths.public_key.clone(),
            fingerprint,
            auth_sock: agent_env.auth_sock().map(str::to_string),
        })
    }
}
