// ABOUTME: Error types for SSH key operations using thiserror.
// ABOUTME: Covers generation, sealing, parsing, and writing keys to disk.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while producing or persisting a keypair.
#[derive(Error, Debug)]
pub enum SshError {
    /// Failed to generate an SSH key.
    #[error("failed to generate SSH key: {0}")]
    GenerateKey(#[source] ssh_key::Error),

    /// Failed to encrypt the private key under the passphrase.
    #[error("failed to encrypt private key: {0}")]
    EncryptKey(#[source] ssh_key::Error),

    /// Failed to decrypt a private key, usually a wrong passphrase.
    #[error("failed to decrypt private key: {0}")]
    DecryptKey(#[source] ssh_key::Error),

    /// Failed to serialize a key.
    #[error("failed to serialize key: {0}")]
    SerializeKey(#[source] ssh_key::Error),

    /// Failed to parse an OpenSSH private key container.
    #[error("failed to parse private key: {0}")]
    ParsePrivateKey(#[source] ssh_key::Error),

    /// Failed to parse an authorized-key line.
    #[error("failed to parse public key: {0}")]
    ParsePublicKey(#[source] ssh_key::Error),

    /// The home directory could not be resolved.
    #[error("could not determine home directory")]
    HomeDirectory,

    /// Failed to write a key file to disk.
    #[error("failed to write key to {path}: {source}")]
    WriteKey {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to create a directory.
    #[error("failed to create directory {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to set file permissions.
    #[error("failed to set permissions on {path}: {source}")]
    SetPermissions {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Unsupported key type for the requested operation.
    #[error("unsupported key type: {0} (only ed25519 is supported)")]
    UnsupportedKeyType(String),
}

/// Result type alias using SshError.
pub type Result<T> = std::result::Result<T, SshError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;
    use std::io;

    #[test]
    fn test_write_key_error_display() {
        let err = SshError::WriteKey {
            path: PathBuf::from("/home/op/.ssh/id_ed25519"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "access denied"),
        };
        let display = err.to_string();
        assert!(display.contains("failed to write key"));
        assert!(display.contains("/home/op/.ssh/id_ed25519"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_create_directory_error_display() {
        let err = SshError::CreateDirectory {
            path: PathBuf::from("/home/op/.ssh"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "access denied"),
        };
        assert!(err.to_string().contains("failed to create directory /home/op/.ssh"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_decrypt_key_error_keeps_source() {
        let err = SshError::DecryptKey(ssh_key::Error::Crypto);
        assert!(err.to_string().contains("failed to decrypt private key"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_home_directory_has_no_source() {
        let err = SshError::HomeDirectory;
        assert_eq!(err.to_string(), "could not determine home directory");
        assert!(err.source().is_none());
    }

    #[test]
    fn test_unsupported_key_type_error_display() {
        let err = SshError::UnsupportedKeyType("rsa".to_string());
        let display = err.to_string();
        assert!(display.contains("rsa"));
        assert!(display.contains("only ed25519 is supported"));
    }
}
