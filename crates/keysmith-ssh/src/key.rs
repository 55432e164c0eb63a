// ABOUTME: ed25519 key generation and passphrase sealing.
// ABOUTME: Turns a fresh keypair into an encrypted OpenSSH container plus an authorized-key line.

use crate::error::{Result, SshError};
use rand::{CryptoRng, RngCore};
use ssh_key::private::{Ed25519Keypair, KeypairData};
use ssh_key::{Cipher, LineEnding, PrivateKey, PublicKey};
use zeroize::Zeroizing;

/// A keypair ready to be written to disk.
///
/// Holds only the encrypted private key container; the plaintext key is
/// consumed by [`seal_keypair`].
pub struct SealedKeypair {
    private_pem: Zeroizing<String>,
    public_key: PublicKey,
    authorized_key: String,
}

impl SealedKeypair {
    /// The encrypted `OPENSSH PRIVATE KEY` block.
    pub fn private_pem(&self) -> &str {
        &self.private_pem
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// The authorized-key line, newline terminated, exactly as written to the `.pub` file.
    pub fn authorized_key(&self) -> &str {
        &self.authorized_key
    }
}

impl std::fmt::Debug for SealedKeypair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SealedKeypair")
            .field("authorized_key", &self.authorized_key.trim_end())
            .finish_non_exhaustive()
    }
}

/// Generate a new ed25519 keypair from the given random source.
///
/// The comment ends up at the end of the authorized-key line, the same way
/// `ssh-keygen -C` labels a key.
///
/// # Errors
/// Returns an error if the key cannot be assembled.
pub fn generate_keypair<R>(rng: &mut R, comment: &str) -> Result<PrivateKey>
where
    R: CryptoRng + RngCore,
{
    let keypair = Ed25519Keypair::random(rng);
    PrivateKey::new(KeypairData::from(keypair), comment).map_err(SshError::GenerateKey)
}

/// Encrypt a private key under `passphrase` and encode both halves.
///
/// Uses the OpenSSH native container with the authenticated
/// `aes256-gcm@openssh.com` cipher keyed through `bcrypt-pbkdf`, which
/// `ssh-add` reads directly. The plaintext key is dropped, and thereby
/// zeroized, before this returns.
///
/// # Errors
/// Returns an error if encryption or encoding fails. Nothing is written anywhere.
pub fn seal_keypair<R>(key: PrivateKey, rng: &mut R, passphrase: &[u8]) -> Result<SealedKeypair>
where
    R: CryptoRng + RngCore,
{
    let encrypted = key
        .encrypt_with_cipher(rng, Cipher::Aes256Gcm, passphrase)
        .map_err(SshError::EncryptKey)?;
    drop(key);

    let private_pem = encrypted
        .to_openssh(LineEnding::LF)
        .map_err(SshError::SerializeKey)?;

    let public_key = encrypted.public_key().clone();
    let mut authorized_key = public_key.to_openssh().map_err(SshError::SerializeKey)?;
    authorized_key.push('\n');

    tracing::debug!(comment = %public_key.comment(), "sealed ed25519 keypair");

    Ok(SealedKeypair {
        private_pem,
        public_key,
        authorized_key,
    })
}

/// Parse and decrypt an encrypted OpenSSH private key.
///
/// # Errors
/// Returns `SshError::ParsePrivateKey` for malformed input and
/// `SshError::DecryptKey` when the passphrase is wrong.
pub fn open_private_key(pem: &str, passphrase: &[u8]) -> Result<PrivateKey> {
    let key = PrivateKey::from_openssh(pem).map_err(SshError::ParsePrivateKey)?;
    if !key.is_encrypted() {
        return Ok(key);
    }
    key.decrypt(passphrase).map_err(SshError::DecryptKey)
}

/// Parse a single authorized-key line.
pub fn parse_authorized_key(line: &str) -> Result<PublicKey> {
    PublicKey::from_openssh(line.trim()).map_err(SshError::ParsePublicKey)
}
