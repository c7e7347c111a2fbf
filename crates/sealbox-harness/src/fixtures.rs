//! Full-size identities shared across tests.
//!
//! Keys use the default 2048-bit modulus and fixed seeds, and are generated
//! on first use.

use std::sync::OnceLock;

use sealbox_crypto::{CryptoConfig, CryptoError, PrimaryKeyPair};

use crate::env::SeededEnv;

/// Alice's identity (seed 0xA11CE).
pub fn alice() -> &'static PrimaryKeyPair {
    static ALICE: OnceLock<PrimaryKeyPair> = OnceLock::new();
    ALICE.get_or_init(|| identity(0xA11CE))
}

/// Bob's identity (seed 0xB0B).
pub fn bob() -> &'static PrimaryKeyPair {
    static BOB: OnceLock<PrimaryKeyPair> = OnceLock::new();
    BOB.get_or_init(|| identity(0xB0B))
}

/// Mallory's identity (seed 0x3A11); never the intended party.
pub fn mallory() -> &'static PrimaryKeyPair {
    static MALLORY: OnceLock<PrimaryKeyPair> = OnceLock::new();
    MALLORY.get_or_init(|| identity(0x3A11))
}

/// Generate a default-size identity from `seed`.
pub fn try_identity(seed: u64) -> Result<PrimaryKeyPair, CryptoError> {
    PrimaryKeyPair::generate(&CryptoConfig::default(), &SeededEnv::new(seed))
}

#[allow(clippy::expect_used)]
fn identity(seed: u64) -> PrimaryKeyPair {
    try_identity(seed).expect("invariant: default config generates keys from a seeded RNG")
}
