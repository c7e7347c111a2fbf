//! Payload encryption with AES-256-CTR.
//!
//! Output layout is `nonce || ciphertext`, where the ciphertext is exactly as
//! long as the plaintext. CTR mode carries no integrity: decrypting with the
//! wrong key silently yields garbage. Envelopes authenticate one layer up.
//!
//! A fresh nonce is drawn for every call. Reusing a (key, nonce) pair for two
//! plaintexts leaks their XOR, so [`sym_encrypt_with_nonce`] is for callers
//! that already own nonce uniqueness (deterministic tests, known answers).

use aes::Aes256;
use ctr::{
    Ctr128BE,
    cipher::{KeyIvInit, StreamCipher},
};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{
    config::{NONCE_LEN, SYMMETRIC_KEY_LEN},
    env::Environment,
    error::CryptoError,
};

/// AES-256 with a 128-bit big-endian counter; the nonce is the initial block.
type Aes256Ctr = Ctr128BE<Aes256>;

/// A 32-byte AES-256 key, zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SymmetricKey([u8; SYMMETRIC_KEY_LEN]);

impl SymmetricKey {
    /// Draw a fresh key from `env`.
    pub fn generate<E: Environment>(env: &E) -> Self {
        Self(env.random_array())
    }

    /// Wrap existing key bytes.
    pub fn from_bytes(bytes: [u8; SYMMETRIC_KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Wrap a decapsulated key, checking its length.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let key: [u8; SYMMETRIC_KEY_LEN] =
            bytes.try_into().map_err(|_| CryptoError::DecryptionFailed)?;
        Ok(Self(key))
    }

    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8; SYMMETRIC_KEY_LEN] {
        &self.0
    }
}

impl std::fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SymmetricKey(..)")
    }
}

/// A 16-byte per-call nonce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Nonce([u8; NONCE_LEN]);

impl Nonce {
    /// Draw a fresh nonce from `env`.
    pub fn generate<E: Environment>(env: &E) -> Self {
        Self(env.random_array())
    }

    /// Wrap existing nonce bytes.
    pub fn from_bytes(bytes: [u8; NONCE_LEN]) -> Self {
        Self(bytes)
    }

    /// Raw nonce bytes.
    pub fn as_bytes(&self) -> &[u8; NONCE_LEN] {
        &self.0
    }
}

/// Encrypt `plaintext` under `key` with a fresh nonce.
///
/// Returns `nonce || ciphertext`.
pub fn sym_encrypt<E: Environment>(plaintext: &[u8], key: &SymmetricKey, env: &E) -> Vec<u8> {
    sym_encrypt_with_nonce(plaintext, key, Nonce::generate(env))
}

/// Encrypt `plaintext` under `key` with a caller-supplied nonce.
///
/// Returns `nonce || ciphertext`.
pub fn sym_encrypt_with_nonce(plaintext: &[u8], key: &SymmetricKey, nonce: Nonce) -> Vec<u8> {
    let mut blob = Vec::with_capacity(NONCE_LEN + plaintext.len());
    blob.extend_from_slice(nonce.as_bytes());
    blob.extend_from_slice(plaintext);

    apply_keystream(key, &nonce, &mut blob[NONCE_LEN..]);
    blob
}

/// Decrypt a `nonce || ciphertext` blob.
///
/// Never detects a wrong key. Fails only when `blob` is too short to hold a
/// nonce.
pub fn sym_decrypt(blob: &[u8], key: &SymmetricKey) -> Result<Vec<u8>, CryptoError> {
    let Some((nonce, ciphertext)) = blob.split_first_chunk::<NONCE_LEN>() else {
        return Err(CryptoError::MalformedEnvelope { len: blob.len(), min: NONCE_LEN });
    };

    let mut plaintext = ciphertext.to_vec();
    apply_keystream(key, &Nonce(*nonce), &mut plaintext);
    Ok(plaintext)
}

fn apply_keystream(key: &SymmetricKey, nonce: &Nonce, buffer: &mut [u8]) {
    let mut cipher = Aes256Ctr::new(key.as_bytes().into(), nonce.as_bytes().into());
    cipher.apply_keystream(buffer);
}
