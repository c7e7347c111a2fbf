//! Sealbox Cryptographic Core
//!
//! Hybrid public-key sealing and sub-key certification. Every context
//! (digest, cipher, signer) is built per call and dropped on return, and every
//! operation that needs randomness takes it from a caller-supplied
//! [`Environment`], so the same seed reproduces the same keys and envelopes.
//!
//! # Envelope Pipeline
//!
//! ```text
//! message
//!    │                      fresh 32-byte key ──► RSA-OAEP ──► encapsulated key
//!    ▼                              │
//! AES-256-CTR (fresh nonce) ◄───────┘
//!    │
//!    ▼
//! encapsulated key || nonce || ciphertext
//!    │
//!    ▼ SHA-512, then RSA PKCS#1 v1.5 (SHA-1)
//! encapsulated key || nonce || ciphertext || signature
//! ```
//!
//! # Security
//!
//! Authenticity:
//! - Envelopes are verified before any private key operation runs
//! - Verification and decapsulation failures render identically
//!
//! Confidentiality:
//! - One symmetric key per envelope, zeroized after use
//! - One nonce per symmetric encryption
//!
//! Certification:
//! - A primary identity signs the fingerprint of each sub key
//! - Chains have length one; sub keys cannot certify further keys

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod asymmetric;
pub mod certification;
pub mod config;
pub mod digest;
pub mod env;
pub mod envelope;
pub mod error;
pub mod keys;
pub mod signature;
pub mod symmetric;

#[cfg(test)]
mod test_env;

pub use asymmetric::{decapsulate, encapsulate, max_payload_len};
pub use certification::{certify_sub_key, validate_sub_key};
pub use config::{CryptoConfig, DEFAULT_MODULUS_BITS, DIGEST_LEN, NONCE_LEN, SYMMETRIC_KEY_LEN};
pub use digest::{Digest, digest, digest_hex};
pub use env::{EnvRng, Environment, SystemEnv};
pub use envelope::{EnvelopeLayout, decrypt_message, encrypt_message, open, seal};
pub use error::CryptoError;
pub use keys::{
    AsymmetricKeyPair, Fingerprint, PrimaryKeyPair, PrimaryPublicKey, PublicKey, SubKeyPair,
    SubPublicKey,
};
pub use signature::{Signature, sign, verify};
pub use symmetric::{Nonce, SymmetricKey, sym_decrypt, sym_encrypt, sym_encrypt_with_nonce};
