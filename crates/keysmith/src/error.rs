// ABOUTME: Error types for the keysmith provisioning workflow.
// ABOUTME: One variant per failing step; every one of them ends the run.

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Failure of the remote key upload.
#[derive(Error, Debug)]
pub enum UploadError {
    #[error("failed to send request to {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("server responded with {status}: {body}")]
    Rejected { status: u16, body: String },
}

#[derive(Error, Debug)]
pub enum ProvisionError {
    #[error("failed to read {what} from terminal: {source}")]
    Prompt {
        what: &'static str,
        #[source]
        source: dialoguer::Error,
    },

    #[error("{path} already exists; pass --force to replace it")]
    KeyExists { path: PathBuf },

    #[error(transparent)]
    Key(#[from] keysmith_ssh::SshError),

    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to start ssh-agent ({program} exited with {status}): {output}")]
    AgentStart {
        program: String,
        status: ExitStatus,
        output: String,
    },

    #[error("{program} did not announce SSH_AUTH_SOCK")]
    AgentSocket { program: String },

    #[error("failed to add {path} to ssh-agent ({program} exited with {status})")]
    AgentAdd {
        program: String,
        path: PathBuf,
        status: ExitStatus,
    },

    #[error("failed to create HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("{var} environment variable not set")]
    MissingToken { var: String },

    #[error(
        "failed to add key to GitHub: {source}\n\
         You can upload the key manually by going to GitHub > Settings > SSH and GPG keys > New SSH key.\n\
         Paste your public key into the 'Key' field.\n\
         Your public key is located at: {}",
        .public_key_path.display()
    )]
    Upload {
        #[source]
        source: UploadError,
        public_key_path: PathBuf,
    },
}

pub type Result<T> = std::result::Result<T, ProvisionError>;
