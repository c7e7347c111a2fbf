//! Seeded environment for unit tests.
//!
//! `sealbox-harness` depends on this crate, so unit tests here cannot use its
//! `SeededEnv` without linking a second copy of `Environment`.

use std::sync::{Arc, Mutex};

use rand_chacha::{
    ChaCha20Rng,
    rand_core::{RngCore, SeedableRng},
};

use crate::env::Environment;

/// Deterministic environment; clones share one generator.
#[derive(Clone)]
pub(crate) struct SeededEnv {
    rng: Arc<Mutex<ChaCha20Rng>>,
}

impl SeededEnv {
    pub(crate) fn new(seed: u64) -> Self {
        Self { rng: Arc::new(Mutex::new(ChaCha20Rng::seed_from_u64(seed))) }
    }
}

impl Environment for SeededEnv {
    fn random_bytes(&self, buffer: &mut [u8]) {
        let mut rng = self.rng.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        rng.fill_bytes(buffer);
    }
}
