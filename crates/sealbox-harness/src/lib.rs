//! Test harness for sealbox.
//!
//! Provides a seeded [`Environment`](sealbox_crypto::Environment) so keys,
//! nonces and padding are reproducible, plus cached full-size identities so
//! each test binary pays for RSA key generation once.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod env;
pub mod fixtures;

pub use env::SeededEnv;
