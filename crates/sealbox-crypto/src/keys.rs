//! RSA key pairs and the primary/sub key hierarchy.
//!
//! ```text
//! PrimaryKeyPair
//!   ├── signing    (AsymmetricKeyPair)  signs envelopes, certifies sub keys
//!   └── encryption (AsymmetricKeyPair)  opens envelopes addressed to it
//!
//! SubKeyPair = AsymmetricKeyPair + primary signature over its fingerprint
//! ```
//!
//! Certification chains have length exactly one: a sub key cannot certify
//! further keys.

use std::fmt;

use rsa::{
    RsaPrivateKey, RsaPublicKey,
    pkcs8::{DecodePublicKey, EncodePublicKey},
    traits::PublicKeyParts,
};

use crate::{
    certification,
    config::CryptoConfig,
    digest::{Digest, digest},
    env::{EnvRng, Environment},
    error::CryptoError,
    signature::Signature,
};

/// SHA-512 digest of a public key's DER `SubjectPublicKeyInfo` encoding.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint(Digest);

impl Fingerprint {
    /// Raw fingerprint bytes; this is what certification signs.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Colon-separated lowercase hex.
    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // First 8 octets are enough to tell keys apart in logs
        let hex = self.to_hex();
        write!(f, "Fingerprint({}..)", &hex[..23])
    }
}

/// An RSA public key together with its canonical encoding and fingerprint.
#[derive(Clone, PartialEq, Eq)]
pub struct PublicKey {
    key: RsaPublicKey,
    der: Vec<u8>,
    fingerprint: Fingerprint,
}

impl PublicKey {
    /// Wrap an RSA public key, computing its canonical encoding once.
    pub fn new(key: RsaPublicKey) -> Result<Self, CryptoError> {
        let der = key
            .to_public_key_der()
            .map_err(|e| CryptoError::Encoding { reason: e.to_string() })?
            .as_bytes()
            .to_vec();
        let fingerprint = Fingerprint(digest(&der));

        Ok(Self { key, der, fingerprint })
    }

    /// Parse a DER `SubjectPublicKeyInfo` encoding.
    pub fn from_der(der: &[u8]) -> Result<Self, CryptoError> {
        let key = RsaPublicKey::from_public_key_der(der)
            .map_err(|e| CryptoError::Encoding { reason: e.to_string() })?;
        Self::new(key)
    }

    /// Canonical DER `SubjectPublicKeyInfo` encoding.
    pub fn to_der(&self) -> &[u8] {
        &self.der
    }

    /// Digest of the canonical encoding.
    pub fn fingerprint(&self) -> &Fingerprint {
        &self.fingerprint
    }

    /// Modulus size in bytes; the length of signatures and encapsulated keys
    /// produced for this key.
    pub fn modulus_len(&self) -> usize {
        self.key.size()
    }

    pub(crate) fn rsa(&self) -> &RsaPublicKey {
        &self.key
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublicKey")
            .field("modulus_bits", &(self.modulus_len() * 8))
            .field("fingerprint", &self.fingerprint)
            .finish()
    }
}

/// An RSA private key and its public half.
#[derive(Clone)]
pub struct AsymmetricKeyPair {
    private: RsaPrivateKey,
    public: PublicKey,
}

impl AsymmetricKeyPair {
    /// Generate a fresh key pair with randomness drawn from `env`.
    pub fn generate<E: Environment>(config: &CryptoConfig, env: &E) -> Result<Self, CryptoError> {
        config.validate()?;

        let mut rng = EnvRng::new(env);
        let private = RsaPrivateKey::new(&mut rng, config.modulus_bits)
            .map_err(|e| CryptoError::KeyGenerationFailed { reason: e.to_string() })?;

        let key_pair = Self::from_private(private)?;
        tracing::debug!(
            modulus_bits = config.modulus_bits,
            fingerprint = ?key_pair.public.fingerprint(),
            "generated key pair"
        );
        Ok(key_pair)
    }

    /// Wrap an existing private key after checking its consistency.
    pub fn from_private(private: RsaPrivateKey) -> Result<Self, CryptoError> {
        private.validate()?;
        let public = PublicKey::new(private.to_public_key())?;
        Ok(Self { private, public })
    }

    /// Public half of the pair.
    pub fn public(&self) -> &PublicKey {
        &self.public
    }

    pub(crate) fn private(&self) -> &RsaPrivateKey {
        &self.private
    }
}

impl fmt::Debug for AsymmetricKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsymmetricKeyPair").field("public", &self.public).finish_non_exhaustive()
    }
}

/// Identity root: one key pair for signing, one for encryption.
#[derive(Debug, Clone)]
pub struct PrimaryKeyPair {
    signing: AsymmetricKeyPair,
    encryption: AsymmetricKeyPair,
}

impl PrimaryKeyPair {
    /// Generate both halves of a primary identity.
    pub fn generate<E: Environment>(config: &CryptoConfig, env: &E) -> Result<Self, CryptoError> {
        let signing = AsymmetricKeyPair::generate(config, env)?;
        let encryption = AsymmetricKeyPair::generate(config, env)?;
        Ok(Self { signing, encryption })
    }

    /// Compose a primary identity from existing key pairs.
    pub fn from_parts(signing: AsymmetricKeyPair, encryption: AsymmetricKeyPair) -> Self {
        Self { signing, encryption }
    }

    /// Key pair used to sign envelopes and certify sub keys.
    pub fn signing(&self) -> &AsymmetricKeyPair {
        &self.signing
    }

    /// Key pair used to open envelopes addressed to this identity.
    pub fn encryption(&self) -> &AsymmetricKeyPair {
        &self.encryption
    }

    /// Public halves, suitable for handing to peers.
    pub fn public(&self) -> PrimaryPublicKey {
        PrimaryPublicKey {
            signing: self.signing.public().clone(),
            encryption: self.encryption.public().clone(),
        }
    }

    /// Generate a fresh key pair and certify it with this identity.
    pub fn issue_sub_key<E: Environment>(
        &self,
        config: &CryptoConfig,
        env: &E,
    ) -> Result<SubKeyPair, CryptoError> {
        let key_pair = AsymmetricKeyPair::generate(config, env)?;
        let certification = certification::certify(key_pair.public(), self)?;

        tracing::debug!(
            sub_key = ?key_pair.public().fingerprint(),
            primary = ?self.signing.public().fingerprint(),
            "issued sub key"
        );
        Ok(SubKeyPair { key_pair, certification })
    }
}

/// Public halves of a [`PrimaryKeyPair`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryPublicKey {
    /// Verifies envelopes and sub key certifications
    pub signing: PublicKey,
    /// Seals envelopes addressed to the identity
    pub encryption: PublicKey,
}

/// A key pair whose fingerprint carries a primary key signature.
#[derive(Debug, Clone)]
pub struct SubKeyPair {
    key_pair: AsymmetricKeyPair,
    certification: Signature,
}

impl SubKeyPair {
    /// Attach an existing certification to a key pair.
    ///
    /// No validation happens here; check with [`SubPublicKey::is_certified_by`].
    pub fn from_parts(key_pair: AsymmetricKeyPair, certification: Signature) -> Self {
        Self { key_pair, certification }
    }

    /// The certified key pair.
    pub fn key_pair(&self) -> &AsymmetricKeyPair {
        &self.key_pair
    }

    /// Primary key signature over this key's fingerprint.
    pub fn certification(&self) -> &Signature {
        &self.certification
    }

    /// Public half with its certification.
    pub fn public(&self) -> SubPublicKey {
        SubPublicKey {
            key: self.key_pair.public().clone(),
            certification: self.certification.clone(),
        }
    }
}

/// Public half of a [`SubKeyPair`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubPublicKey {
    /// The certified public key
    pub key: PublicKey,
    /// Primary key signature over `key`'s fingerprint
    pub certification: Signature,
}

impl SubPublicKey {
    /// Returns true if `primary` signed this key's fingerprint.
    pub fn is_certified_by(&self, primary: &PrimaryPublicKey) -> bool {
        certification::validate_sub_key(
            Some(&self.key),
            self.certification.as_bytes(),
            Some(primary),
        )
    }
}
