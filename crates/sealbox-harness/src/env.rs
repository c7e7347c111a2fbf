//! Seeded environment for deterministic tests.

use std::sync::{Arc, Mutex, PoisonError};

use rand_chacha::{
    ChaCha20Rng,
    rand_core::{RngCore, SeedableRng},
};
use sealbox_crypto::Environment;

/// Deterministic environment driven by a seeded ChaCha20 stream.
///
/// Clones share one generator, so interleaved draws from several clones still
/// form a single reproducible sequence. Each `random_bytes` call holds the
/// lock for the whole fill.
#[derive(Clone)]
pub struct SeededEnv {
    rng: Arc<Mutex<ChaCha20Rng>>,
}

impl SeededEnv {
    /// Create an environment whose byte stream is fixed by `seed`.
    pub fn new(seed: u64) -> Self {
        Self { rng: Arc::new(Mutex::new(ChaCha20Rng::seed_from_u64(seed))) }
    }
}

impl Environment for SeededEnv {
    fn random_bytes(&self, buffer: &mut [u8]) {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.fill_bytes(buffer);
    }
}
