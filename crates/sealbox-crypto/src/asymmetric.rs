//! Key encapsulation with RSA-OAEP (SHA-1, MGF1-SHA-1).
//!
//! OAEP padding is randomized: encapsulating the same payload twice yields
//! different ciphertexts. Decapsulation uses RSA blinding with randomness from
//! the caller's environment.
//!
//! `rsa` 0.9 decryption is not constant time (RUSTSEC-2023-0071). Envelopes
//! verify the sender signature before calling [`decapsulate`], which keeps
//! attacker-chosen ciphertexts away from the private key; keep that order.

use rsa::Oaep;
use sha1::Sha1;
use zeroize::Zeroizing;

use crate::{
    env::{EnvRng, Environment},
    error::CryptoError,
    keys::{AsymmetricKeyPair, PublicKey},
};

/// OAEP overhead with SHA-1: two hash lengths plus two framing bytes.
const OAEP_SHA1_OVERHEAD: usize = 2 * 20 + 2;

/// Largest payload `public_key` can encapsulate.
pub fn max_payload_len(public_key: &PublicKey) -> usize {
    public_key.modulus_len().saturating_sub(OAEP_SHA1_OVERHEAD)
}

/// Encrypt a short payload (typically a symmetric key) to `public_key`.
///
/// The ciphertext is exactly `public_key.modulus_len()` bytes.
pub fn encapsulate<E: Environment>(
    payload: &[u8],
    public_key: &PublicKey,
    env: &E,
) -> Result<Vec<u8>, CryptoError> {
    let max = max_payload_len(public_key);
    if payload.len() > max {
        return Err(CryptoError::PayloadTooLarge { len: payload.len(), max });
    }

    let mut rng = EnvRng::new(env);
    Ok(public_key.rsa().encrypt(&mut rng, Oaep::new::<Sha1>(), payload)?)
}

/// Recover a payload encapsulated to `key_pair`.
///
/// Returns `None` when padding validation fails, which means the wrong key was
/// used or the ciphertext was corrupted. The cause is not reported further so
/// callers cannot accidentally expose a padding oracle.
pub fn decapsulate<E: Environment>(
    ciphertext: &[u8],
    key_pair: &AsymmetricKeyPair,
    env: &E,
) -> Option<Zeroizing<Vec<u8>>> {
    let mut rng = EnvRng::new(env);
    key_pair
        .private()
        .decrypt_blinded(&mut rng, Oaep::new::<Sha1>(), ciphertext)
        .ok()
        .map(Zeroizing::new)
}

#[cfg(test)]
mod tests {
    use std::sync::OnceLock;

    use super::*;
    use crate::{config::CryptoConfig, test_env::SeededEnv};

    fn recipient() -> &'static AsymmetricKeyPair {
        static RECIPIENT: OnceLock<AsymmetricKeyPair> = OnceLock::new();
        RECIPIENT.get_or_init(|| {
            AsymmetricKeyPair::generate(&CryptoConfig { modulus_bits: 1024 }, &SeededEnv::new(31))
                .unwrap()
        })
    }

    fn stranger() -> &'static AsymmetricKeyPair {
        static STRANGER: OnceLock<AsymmetricKeyPair> = OnceLock::new();
        STRANGER.get_or_init(|| {
            AsymmetricKeyPair::generate(&CryptoConfig { modulus_bits: 1024 }, &SeededEnv::new(32))
                .unwrap()
        })
    }

    #[test]
    fn encapsulate_decapsulate_roundtrip() {
        let env = SeededEnv::new(1);
        let payload = [0x5A; 32];

        let ciphertext = encapsulate(&payload, recipient().public(), &env).unwrap();
        let recovered = decapsulate(&ciphertext, recipient(), &env).unwrap();

        assert_eq!(recovered.as_slice(), payload.as_slice());
    }

    #[test]
    fn ciphertext_length_is_modulus_length() {
        let env = SeededEnv::new(2);
        let ciphertext = encapsulate(&[1, 2, 3], recipient().public(), &env).unwrap();
        assert_eq!(ciphertext.len(), recipient().public().modulus_len());
    }

    #[test]
    fn padding_is_randomized() {
        let env = SeededEnv::new(3);
        let payload = [0x11; 32];

        let first = encapsulate(&payload, recipient().public(), &env).unwrap();
        let second = encapsulate(&payload, recipient().public(), &env).unwrap();

        assert_ne!(first, second, "repeated encapsulation must differ");
    }

    #[test]
    fn wrong_key_returns_none() {
        let env = SeededEnv::new(4);
        let ciphertext = encapsulate(&[0x22; 32], recipient().public(), &env).unwrap();

        assert!(decapsulate(&ciphertext, stranger(), &env).is_none());
    }

    #[test]
    fn corrupted_ciphertext_returns_none() {
        let env = SeededEnv::new(5);
        let mut ciphertext = encapsulate(&[0x33; 32], recipient().public(), &env).unwrap();
        ciphertext[40] ^= 0x80;

        assert!(decapsulate(&ciphertext, recipient(), &env).is_none());
    }

    #[test]
    fn wrong_length_ciphertext_returns_none() {
        let env = SeededEnv::new(6);
        assert!(decapsulate(&[], recipient(), &env).is_none());
        assert!(decapsulate(&[0u8; 7], recipient(), &env).is_none());
        assert!(decapsulate(&vec![0u8; 129], recipient(), &env).is_none());
    }

    #[test]
    fn oversized_payload_is_rejected() {
        let env = SeededEnv::new(7);
        let max = max_payload_len(recipient().public());
        assert_eq!(max, 128 - 42);

        assert!(encapsulate(&vec![0u8; max], recipient().public(), &env).is_ok());
        assert_eq!(
            encapsulate(&vec![0u8; max + 1], recipient().public(), &env),
            Err(CryptoError::PayloadTooLarge { len: max + 1, max })
        );
    }
}
