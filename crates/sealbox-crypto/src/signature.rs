//! RSA signatures over SHA-512 digests.
//!
//! The message is first reduced to its SHA-512 digest; that digest is then
//! signed with RSASSA-PKCS1-v1_5 using SHA-1 as the signature hash. The SHA-1
//! step is kept for interoperability with existing peers.
//!
//! Contexts are built per call. Nothing is shared between invocations, so a
//! failed call leaves no state behind.

use std::fmt;

use rsa::Pkcs1v15Sign;
use sha1::{Digest as _, Sha1};

use crate::{
    digest::{colon_hex, digest},
    error::CryptoError,
    keys::{AsymmetricKeyPair, PublicKey},
};

/// A PKCS#1 v1.5 signature; its length equals the signer's modulus length.
#[derive(Clone, PartialEq, Eq)]
pub struct Signature(Vec<u8>);

impl Signature {
    /// Wrap raw signature bytes received from a peer.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Raw signature bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Signature length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for a zero-length signature (never produced by [`sign`]).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consume into raw bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let head = colon_hex(&self.0[..self.0.len().min(4)]);
        write!(f, "Signature({} bytes, {head}..)", self.0.len())
    }
}

/// Sign the SHA-512 digest of `message` with the key pair's private key.
pub fn sign(message: &[u8], signer: &AsymmetricKeyPair) -> Result<Signature, CryptoError> {
    let hashed = signature_hash(message);
    let bytes = signer.private().sign(Pkcs1v15Sign::new::<Sha1>(), &hashed)?;
    Ok(Signature(bytes))
}

/// Check `signature` over `message` against `public_key`.
///
/// Returns false for a wrong key, a tampered message or a malformed signature.
/// Never errors.
pub fn verify(message: &[u8], signature: &[u8], public_key: &PublicKey) -> bool {
    if signature.len() != public_key.modulus_len() {
        return false;
    }

    let hashed = signature_hash(message);
    public_key.rsa().verify(Pkcs1v15Sign::new::<Sha1>(), &hashed, signature).is_ok()
}

/// SHA-1 of the SHA-512 digest: the value PKCS#1 v1.5 actually encodes.
fn signature_hash(message: &[u8]) -> Vec<u8> {
    Sha1::digest(digest(message).as_bytes()).to_vec()
}
