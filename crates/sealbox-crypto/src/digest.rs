//! SHA-512 content digests.

use std::fmt::{self, Write as _};

use sha2::{Digest as _, Sha512};

use crate::config::DIGEST_LEN;

/// A 64-byte SHA-512 digest.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest([u8; DIGEST_LEN]);

impl Digest {
    /// Raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Lowercase hex octets joined by `:`, e.g. `"00:1a:ff"`.
    pub fn to_hex(&self) -> String {
        colon_hex(&self.0)
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.to_hex())
    }
}

/// Compute the SHA-512 digest of `bytes`.
pub fn digest(bytes: &[u8]) -> Digest {
    let hash = Sha512::digest(bytes);
    let mut out = [0u8; DIGEST_LEN];
    out.copy_from_slice(&hash);
    Digest(out)
}

/// Compute the SHA-512 digest of `bytes` in human-readable colon form.
pub fn digest_hex(bytes: &[u8]) -> String {
    digest(bytes).to_hex()
}

pub(crate) fn colon_hex(bytes: &[u8]) -> String {
    // Two hex digits per byte plus one separator between bytes
    let mut out = String::with_capacity((bytes.len() * 3).saturating_sub(1));
    for (i, byte) in bytes.iter().enumerate() {
        if i > 0 {
            out.push(':');
        }
        let _ = write!(out, "{byte:02x}");
    }
    out
}
