// ABOUTME: ssh-agent bootstrap and key loading.
// ABOUTME: Scrapes the agent's env announcements and feeds the passphrase to ssh-add.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};
use zeroize::Zeroizing;

use crate::error::{ProvisionError, Result};

pub const AUTH_SOCK_VAR: &str = "SSH_AUTH_SOCK";
pub const AGENT_PID_VAR: &str = "SSH_AGENT_PID";

/// Environment variables announced by an agent on startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentEnv {
    vars: Vec<(String, String)>,
}

impl AgentEnv {
    /// Scan agent output for variable announcements.
    ///
    /// Recognizes `export NAME=value` and the Bourne form
    /// `NAME=value; export NAME;` printed by `ssh-agent -s`. Anything else
    /// is skipped.
    pub fn parse(output: &str) -> Self {
        let vars = output.lines().filter_map(parse_line).collect();
        Self { vars }
    }

    pub fn vars(&self) -> &[(String, String)] {
        &self.vars
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn auth_sock(&self) -> Option<&str> {
        self.get(AUTH_SOCK_VAR)
    }

    /// Set every announced variable in this process so child processes
    /// can find the agent.
    pub fn apply(&self) {
        for (name, value) in &self.vars {
            tracing::debug!(%name, %value, "exporting agent variable");
            std::env::set_var(name, value);
        }
    }
}

fn parse_line(line: &str) -> Option<(String, String)> {
    let line = line.trim();

    // export NAME=value
    if let Some((directive, rest)) = line.split_once(' ') {
        if directive == "export" {
            let (name, value) = rest.trim_start().split_once('=')?;
            return valid_pair(name, value.trim_end_matches(';'));
        }
    }

    // NAME=value; export NAME;
    let (assignment, tail) = line.split_once(';')?;
    let (name, value) = assignment.split_once('=')?;
    let exported = tail.trim().trim_end_matches(';').strip_prefix("export ")?;
    if exported.trim() != name {
        return None;
    }
    valid_pair(name, value)
}

fn valid_pair(name: &str, value: &str) -> Option<(String, String)> {
    let mut chars = name.chars();
    let first = chars.next()?;
    let is_ident = (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !is_ident || value.contains('\0') {
        return None;
    }
    Some((name.to_string(), value.to_string()))
}

/// Handle on a key agent: start it, then hand it a key.
pub trait KeyAgent {
    fn start(&self) -> Result<AgentEnv>;

    fn add_key(&self, private_key: &Path, passphrase: &str) -> Result<()>;
}

/// The OpenSSH agent, driven through `ssh-agent` and `ssh-add`.
#[derive(Debug, Clone)]
pub struct SshAgent {
    agent_program: String,
    add_program: String,
}

impl SshAgent {
    pub fn new(agent_program: impl Into<String>, add_program: impl Into<String>) -> Self {
        Self {
            agent_program: agent_program.into(),
            add_program: add_program.into(),
        }
    }
}

impl KeyAgent for SshAgent {
    fn start(&self) -> Result<AgentEnv> {
        let output = Command::new(&self.agent_program)
            .arg("-s")
            .stdin(Stdio::null())
            .output()
            .map_err(|source| ProvisionError::Spawn {
                program: self.agent_program.clone(),
                source,
            })?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        if !output.status.success() {
            return Err(ProvisionError::AgentStart {
                program: self.agent_program.clone(),
                status: output.status,
                output: combined.trim().to_string(),
            });
        }

        let env = AgentEnv::parse(&combined);
        if env.auth_sock().is_none() {
            return Err(ProvisionError::AgentSocket {
                program: self.agent_program.clone(),
            });
        }

        tracing::info!(socket = ?env.auth_sock(), pid = ?env.get(AGENT_PID_VAR), "ssh-agent started");
        Ok(env)
    }

    fn add_key(&self, private_key: &Path, passphrase: &str) -> Result<()> {
        let spawn_err = |source| ProvisionError::Spawn {
            program: self.add_program.clone(),
            source,
        };

        let mut child = Command::new(&self.add_program)
            .arg(private_key)
            .stdin(Stdio::piped())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(spawn_err)?;

        if let Some(mut stdin) = child.stdin.take() {
            let mut line = Zeroizing::new(String::with_capacity(passphrase.len() + 1));
            line.push_str(passphrase);
            line.push('\n');
            // ssh-add may exit before reading; its exit status reports that case
            if let Err(e) = stdin.write_all(line.as_bytes()) {
                tracing::debug!(error = %e, "could not write passphrase to ssh-add");
            }
        }

        let status = child.wait().map_err(spawn_err)?;
        if !status.success() {
            return Err(ProvisionError::AgentAdd {
                program: self.add_program.clone(),
                path: private_key.to_path_buf(),
                status,
            });
        }

        tracing::info!(path = %private_key.display(), "key added to ssh-agent");
        Ok(())
    }
}
