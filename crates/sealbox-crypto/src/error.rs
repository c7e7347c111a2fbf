//! Error types for sealing, opening and certification.
//!
//! Callers branch on the variant rather than on message text. Rejections of
//! hostile or corrupted input are recoverable; configuration and invariant
//! failures are not.

use thiserror::Error;

/// Errors from sealbox cryptographic operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// Key pair could not be generated (entropy or prime search failure)
    #[error("key generation failed: {reason}")]
    KeyGenerationFailed {
        /// Underlying cause
        reason: String,
    },

    /// Configuration rejected before any key material was produced
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// What was wrong with the configuration
        reason: String,
    },

    /// Buffer is shorter than the smallest well-formed envelope
    #[error("malformed envelope: {len} bytes, need at least {min}")]
    MalformedEnvelope {
        /// Length of the rejected buffer
        len: usize,
        /// Minimum structural length for the keys in use
        min: usize,
    },

    /// Envelope signature did not verify under the sender's key.
    ///
    /// Displays identically to [`Self::DecryptionFailed`] so the text cannot
    /// serve as a stage oracle.
    #[error("envelope rejected")]
    SignatureInvalid,

    /// Key encapsulation could not be opened with the recipient key
    #[error("envelope rejected")]
    DecryptionFailed,

    /// Payload exceeds what the asymmetric padding can carry
    #[error("payload too large for key: {len} bytes, max {max}")]
    PayloadTooLarge {
        /// Payload length
        len: usize,
        /// Maximum payload for this modulus and padding
        max: usize,
    },

    /// Authenticated payload is not valid UTF-8 text
    #[error("payload is not valid UTF-8")]
    InvalidUtf8,

    /// Key material could not be encoded or decoded
    #[error("key encoding failed: {reason}")]
    Encoding {
        /// Underlying cause
        reason: String,
    },

    /// Output buffer could not be assembled (internal invariant violation)
    #[error("envelope assembly failed: {reason}")]
    IoAssembly {
        /// Underlying cause
        reason: String,
    },
}

impl CryptoError {
    /// Returns true if the input message was rejected.
    ///
    /// Rejections are the expected outcome for tampered, truncated or
    /// misaddressed envelopes. Drop the message and continue.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::MalformedEnvelope { .. }
                | Self::SignatureInvalid
                | Self::DecryptionFailed
                | Self::InvalidUtf8
        )
    }

    /// Returns true if this error indicates a broken deployment or a bug.
    pub fn is_fatal(&self) -> bool {
        match self {
            // Broken deployment or invariant violation
            Self::KeyGenerationFailed { .. }
            | Self::InvalidConfig { .. }
            | Self::IoAssembly { .. } => true,

            // Bad input for this call only
            Self::MalformedEnvelope { .. }
            | Self::SignatureInvalid
            | Self::DecryptionFailed
            | Self::PayloadTooLarge { .. }
            | Self::InvalidUtf8
            | Self::Encoding { .. } => false,
        }
    }
}

impl From<rsa::Error> for CryptoError {
    fn from(err: rsa::Error) -> Self {
        Self::Encoding { reason: err.to_string() }
    }
}
