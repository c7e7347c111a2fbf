//! Hybrid envelopes: RSA-OAEP key encapsulation, AES-CTR payload, RSA
//! signature over both.
//!
//! # Wire Layout
//!
//! ```text
//! offset 0          encapsulated key    M bytes  (recipient modulus length)
//! offset M          nonce               16 bytes
//! offset M+16       ciphertext          len(message) bytes
//! offset M+16+len   signature           S bytes  (sender modulus length)
//! ```
//!
//! The signature covers everything before it.
//!
//! # Opening Order
//!
//! 1. Length check against the layout implied by the two keys
//! 2. Signature verification under the sender's signing key
//! 3. Key decapsulation with the recipient's private key
//! 4. Payload decryption
//!
//! Nothing unauthenticated reaches the RSA private key operation. Signature
//! and decapsulation failures share one `Display` text; the stage is only
//! recorded in debug logs.

use crate::{
    asymmetric::{decapsulate, encapsulate},
    config::NONCE_LEN,
    env::Environment,
    error::CryptoError,
    keys::{AsymmetricKeyPair, PublicKey},
    signature::{sign, verify},
    symmetric::{SymmetricKey, sym_decrypt, sym_encrypt},
};

/// Byte sizes of the fixed envelope fields for one (recipient, sender) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvelopeLayout {
    /// Length of the encapsulated symmetric key (recipient modulus length)
    pub encapsulated_key_len: usize,
    /// Length of the trailing signature (sender modulus length)
    pub signature_len: usize,
}

impl EnvelopeLayout {
    /// Layout for envelopes sealed to `recipient` and signed by `sender_signing`.
    pub fn for_keys(recipient: &PublicKey, sender_signing: &PublicKey) -> Self {
        Self {
            encapsulated_key_len: recipient.modulus_len(),
            signature_len: sender_signing.modulus_len(),
        }
    }

    /// Length of an envelope carrying an empty message.
    pub fn min_len(&self) -> usize {
        self.encapsulated_key_len + NONCE_LEN + self.signature_len
    }

    /// Length of an envelope carrying `message_len` bytes.
    pub fn envelope_len(&self, message_len: usize) -> usize {
        self.min_len() + message_len
    }
}

/// Seal raw bytes for `recipient`, signed by `sender_signing`.
pub fn seal<E: Environment>(
    message: &[u8],
    recipient: &PublicKey,
    sender_signing: &AsymmetricKeyPair,
    env: &E,
) -> Result<Vec<u8>, CryptoError> {
    let layout = EnvelopeLayout::for_keys(recipient, sender_signing.public());

    let key = SymmetricKey::generate(env);
    let encapsulated_key = encapsulate(key.as_bytes(), recipient, env)?;
    let encrypted_payload = sym_encrypt(message, &key, env);

    if encapsulated_key.len() != layout.encapsulated_key_len {
        return Err(CryptoError::IoAssembly {
            reason: format!(
                "encapsulated key is {} bytes, layout expects {}",
                encapsulated_key.len(),
                layout.encapsulated_key_len
            ),
        });
    }

    let mut envelope = Vec::with_capacity(layout.envelope_len(message.len()));
    envelope.extend_from_slice(&encapsulated_key);
    envelope.extend_from_slice(&encrypted_payload);

    let signature = sign(&envelope, sender_signing)?;
    if signature.len() != layout.signature_len {
        return Err(CryptoError::IoAssembly {
            reason: format!(
                "signature is {} bytes, layout expects {}",
                signature.len(),
                layout.signature_len
            ),
        });
    }
    envelope.extend_from_slice(signature.as_bytes());

    Ok(envelope)
}

/// Seal a text message for `recipient`, signed by `sender_signing`.
pub fn encrypt_message<E: Environment>(
    message: &str,
    recipient: &PublicKey,
    sender_signing: &AsymmetricKeyPair,
    env: &E,
) -> Result<Vec<u8>, CryptoError> {
    seal(message.as_bytes(), recipient, sender_signing, env)
}

/// Authenticate and open an envelope, returning the raw message bytes.
///
/// # Errors
///
/// - `MalformedEnvelope`: shorter than the layout for these keys allows
/// - `SignatureInvalid`: not signed by `sender_signing` or modified in transit
/// - `DecryptionFailed`: signed correctly but sealed to a different recipient
pub fn open<E: Environment>(
    envelope: &[u8],
    recipient: &AsymmetricKeyPair,
    sender_signing: &PublicKey,
    env: &E,
) -> Result<Vec<u8>, CryptoError> {
    let layout = EnvelopeLayout::for_keys(recipient.public(), sender_signing);

    let min = layout.min_len();
    if envelope.len() < min {
        tracing::debug!(len = envelope.len(), min, "rejected envelope: too short");
        return Err(CryptoError::MalformedEnvelope { len: envelope.len(), min });
    }

    let (signed, signature) = envelope.split_at(envelope.len() - layout.signature_len);
    if !verify(signed, signature, sender_signing) {
        tracing::debug!(len = envelope.len(), "rejected envelope: signature");
        return Err(CryptoError::SignatureInvalid);
    }

    let (encapsulated_key, encrypted_payload) = signed.split_at(layout.encapsulated_key_len);
    let Some(key_bytes) = decapsulate(encapsulated_key, recipient, env) else {
        tracing::debug!(len = envelope.len(), "rejected envelope: key decapsulation");
        return Err(CryptoError::DecryptionFailed);
    };
    let key = SymmetricKey::from_slice(&key_bytes)?;

    sym_decrypt(encrypted_payload, &key)
}

/// Authenticate and open an envelope carrying a text message.
///
/// Fails with `InvalidUtf8` if the authenticated payload is not text.
pub fn decrypt_message<E: Environment>(
    envelope: &[u8],
    recipient: &AsymmetricKeyPair,
    sender_signing: &PublicKey,
    env: &E,
) -> Result<String, CryptoError> {
    let bytes = open(envelope, recipient, sender_signing, env)?;
    String::from_utf8(bytes).map_err(|_| CryptoError::InvalidUtf8)
}
