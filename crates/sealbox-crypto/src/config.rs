//! Key generation parameters and fixed primitive sizes.
//!
//! Only the symmetric sizes are global. Everything that depends on the RSA
//! modulus (encapsulated key length, signature length) is read from the keys
//! themselves, so envelopes built with different moduli still parse.

use crate::error::CryptoError;

/// Symmetric key length in bytes (AES-256)
pub const SYMMETRIC_KEY_LEN: usize = 32;

/// Nonce length in bytes (one AES block, the initial CTR counter)
pub const NONCE_LEN: usize = 16;

/// Digest length in bytes (SHA-512)
pub const DIGEST_LEN: usize = 64;

/// Default RSA modulus size in bits
pub const DEFAULT_MODULUS_BITS: usize = 2048;

/// Smallest modulus accepted for new keys.
///
/// OAEP with SHA-1 needs at least 74 bytes of modulus to carry a 32-byte key;
/// anything below 1024 bits is also trivially factorable.
const MIN_MODULUS_BITS: usize = 1024;

/// Configuration for generating sealbox key pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CryptoConfig {
    /// RSA modulus size in bits for newly generated key pairs
    pub modulus_bits: usize,
}

impl Default for CryptoConfig {
    fn default() -> Self {
        Self { modulus_bits: DEFAULT_MODULUS_BITS }
    }
}

impl CryptoConfig {
    /// Check that keys generated with this configuration can seal envelopes.
    pub fn validate(&self) -> Result<(), CryptoError> {
        if self.modulus_bits < MIN_MODULUS_BITS {
            return Err(CryptoError::InvalidConfig {
                reason: format!(
                    "modulus of {} bits is below the {MIN_MODULUS_BITS}-bit minimum",
                    self.modulus_bits
                ),
            });
        }

        if self.modulus_bits % 8 != 0 {
            return Err(CryptoError::InvalidConfig {
                reason: format!("modulus of {} bits is not a whole number of bytes", self.modulus_bits),
            });
        }

        Ok(())
    }

    /// Modulus size in bytes. Equals both the encapsulated key length and the
    /// signature length for keys generated with this configuration.
    pub fn modulus_len(&self) -> usize {
        self.modulus_bits / 8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_2048_bits() {
        let config = CryptoConfig::default();
        assert_eq!(config.modulus_bits, 2048);
        assert_eq!(config.modulus_len(), 256);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_small_modulus() {
        let config = CryptoConfig { modulus_bits: 512 };
        assert!(matches!(config.validate(), Err(CryptoError::InvalidConfig { .. })));
    }

    #[test]
    fn rejects_partial_byte_modulus() {
        let config = CryptoConfig { modulus_bits: 2047 };
        assert!(matches!(config.validate(), Err(CryptoError::InvalidConfig { .. })));
    }

    #[test]
    fn accepts_larger_moduli() {
        for bits in [1024, 3072, 4096] {
            assert!(CryptoConfig { modulus_bits: bits }.validate().is_ok(), "{bits} bits");
        }
    }
}
