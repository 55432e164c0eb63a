// ABOUTME: SSH public key fingerprint computation.
// ABOUTME: Produces the SHA256:<base64> form printed by ssh-keygen and shown by GitHub.

use crate::error::{Result, SshError};
use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine;
use sha2::{Digest, Sha256};
use ssh_key::PublicKey;

/// Compute the OpenSSH-style SHA256 fingerprint of a public key.
///
/// The hash covers the key in SSH wire format:
///
/// - Algorithm name as SSH string (4-byte length prefix + "ssh-ed25519")
/// - Key data as SSH string (4-byte length prefix + 32-byte public key)
///
/// The digest is rendered as `SHA256:` followed by unpadded standard base64,
/// which is what `ssh-keygen -l` and the GitHub key settings page display.
///
/// # Errors
/// Returns `SshError::UnsupportedKeyType` for non-ed25519 keys.
pub fn compute_fingerprint(public_key: &PublicKey) -> Result<String> {
    let key_bytes: &[u8] = match public_key.key_data() {
        ssh_key::public::KeyData::Ed25519(ed) => ed.as_ref(),
        other => {
            return Err(SshError::UnsupportedKeyType(format!(
                "{:?}",
                other.algorithm()
            )));
        }
    };

    let mut wire_data = Vec::with_capacity(51);
    write_ssh_string(&mut wire_data, b"ssh-ed25519");
    write_ssh_string(&mut wire_data, key_bytes);

    let hash = Sha256::digest(&wire_data);
    Ok(format!("SHA256:{}", STANDARD_NO_PAD.encode(hash)))
}

fn write_ssh_string(buf: &mut Vec<u8>, data: &[u8]) {
    buf.extend_from_slice(&(data.len() as u32).to_be_bytes());
    buf.extend_from_slice(data);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::generate_keypair;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use ssh_key::HashAlg;

    fn seeded_key(seed: u64) -> ssh_key::PrivateKey {
        let mut rng = StdRng::seed_from_u64(seed);
        generate_keypair(&mut rng, "fp@example.com").expect("should generate ed25519 key")
    }

    #[test]
    fn test_fingerprint_matches_ssh_key_crate() {
        let key = seeded_key(1);
        let ours = compute_fingerprint(key.public_key()).expect("should compute fingerprint");
        let theirs = key.public_key().fingerprint(HashAlg::Sha256).to_string();
        assert_eq!(ours, theirs);
    }

    #[test]
    fn test_fingerprint_format() {
        let key = seeded_key(2);
        let fp = compute_fingerprint(key.public_key()).expect("should compute fingerprint");

        let encoded = fp.strip_prefix("SHA256:").expect("should carry SHA256 prefix");
        // 32-byte digest in unpadded base64
        assert_eq!(encoded.len(), 43);
        assert!(!encoded.ends_with('='));
    }

    #[test]
    fn test_fingerprint_different_keys() {
        let fp1 = compute_fingerprint(seeded_key(3).public_key()).expect("should compute");
        let fp2 = compute_fingerprint(seeded_key(4).public_key()).expect("should compute");
        assert_ne!(fp1, fp2, "different keys should have different fingerprints");
    }

    #[test]
    fn test_fingerprint_ignores_comment() {
        let key = seeded_key(5);
        let line = key.public_key().to_openssh().expect("should encode");
        let bare = line.rsplit_once(' ').map(|(k, _)| k).unwrap_or(&line);
        let reparsed = PublicKey::from_openssh(bare).expect("should parse");

        assert_eq!(
            compute_fingerprint(key.public_key()).unwrap(),
            compute_fingerprint(&reparsed).unwrap()
        );
    }
}
