// ABOUTME: Interactive collection of the operator's email and passphrase.
// ABOUTME: The passphrase is read without echo and kept in a zeroizing buffer.

use dialoguer::{Input, Password};
use std::io::{BufRead, IsTerminal};
use zeroize::Zeroizing;

use crate::error::{ProvisionError, Result};

/// Source of the two interactive inputs.
pub trait Prompter {
    /// Email-like label for the key. Not validated.
    fn identity(&self) -> Result<String>;

    /// Passphrase protecting the private key.
    fn passphrase(&self) -> Result<Zeroizing<String>>;
}

/// Prompts on the controlling terminal.
///
/// Neither input is validated; empty answers are accepted as typed.
#[derive(Debug, Default)]
pub struct TerminalPrompter {
    confirm: bool,
}

impl TerminalPrompter {
    /// With `confirm`, the passphrase has to be typed twice.
    pub fn new(confirm: bool) -> Self {
        Self { confirm }
    }

    pub fn confirms_passphrase(&self) -> bool {
        self.confirm
    }
}

impl Prompter for TerminalPrompter {
    fn identity(&self) -> Result<String> {
        let prompt_err = |source: dialoguer::Error| ProvisionError::Prompt {
            what: "email",
            source,
        };

        let stdin = std::io::stdin();
        if !stdin.is_terminal() {
            eprint!("Enter your email: ");
            return read_identity(stdin.lock()).map_err(|e| prompt_err(e.into()));
        }

        Input::<String>::new()
            .with_prompt("Enter your email")
            .allow_empty(true)
            .interact_text()
            .map(|email| email.trim().to_string())
            .map_err(prompt_err)
    }

    fn passphrase(&self) -> Result<Zeroizing<String>> {
        let mut password = Password::new();
        password = password
            .with_prompt("Enter your passphrase")
            .allow_empty_password(true);
        if self.confirm {
            password = password.with_confirmation("Confirm passphrase", "Passphrases do not match");
        }

        password
            .interact()
            .map(Zeroizing::new)
            .map_err(|source| ProvisionError::Prompt {
                what: "passphrase",
                source,
            })
    }
}

/// Read one line of identity from piped input. End of input yields an empty label.
pub fn read_identity(mut reader: impl BufRead) -> std::io::Result<String> {
    let mut line = String::new();
    reader.read_line(&mut line)?;
    Ok(line.trim().to_string())
}
