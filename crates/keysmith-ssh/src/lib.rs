// ABOUTME: SSH key utilities for keysmith.
// ABOUTME: Re-exports key generation, sealing, fingerprinting, and persistence helpers.

mod error;
mod fingerprint;
mod key;
mod store;

pub use error::{Result, SshError};
pub use fingerprint::compute_fingerprint;
pub use key::{
    generate_keypair, open_private_key, parse_authorized_key, seal_keypair, SealedKeypair,
};
pub use store::{default_key_dir, write_keypair, KeyPaths, DEFAULT_KEY_NAME};

pub use ssh_key::{PrivateKey, PublicKey};
