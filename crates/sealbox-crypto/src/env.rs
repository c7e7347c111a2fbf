//! Environment abstraction for injectable randomness.
//!
//! Every operation that needs fresh bytes (key generation, nonces, OAEP
//! padding, decryption blinding) takes an [`Environment`]. Production code
//! passes [`SystemEnv`]; tests pass a seeded generator and get reproducible
//! keys and ciphertexts.

use rand_core::{CryptoRng, RngCore};

/// Source of randomness threaded through every sealbox operation.
///
/// # Safety
///
/// Implementations MUST guarantee:
///
/// - `random_bytes()` uses cryptographically secure entropy in production
/// - A single call fills the whole buffer from one logical draw, even when the
///   environment is cloned and shared across threads
pub trait Environment: Clone + Send + Sync + 'static {
    /// Fills the provided buffer with random bytes.
    ///
    /// # Invariants
    ///
    /// - Given the same RNG seed, this produces the same sequence of bytes
    /// - Uses cryptographically secure RNG
    fn random_bytes(&self, buffer: &mut [u8]);

    /// Returns a fixed-size array of random bytes.
    fn random_array<const N: usize>(&self) -> [u8; N] {
        let mut bytes = [0u8; N];
        self.random_bytes(&mut bytes);
        bytes
    }
}

/// Production environment backed by the OS cryptographic RNG.
///
/// # Panics
///
/// Panics if the OS RNG fails. A process without functioning cryptographic
/// randomness cannot produce keys, nonces or padding safely, and continuing
/// would silently weaken every message sealed afterwards.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

impl SystemEnv {
    /// Create a new system environment.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Environment for SystemEnv {
    #[allow(clippy::expect_used)]
    fn random_bytes(&self, buffer: &mut [u8]) {
        getrandom::fill(buffer)
            .expect("invariant: OS RNG failure is unrecoverable - cannot seal securely");
    }
}

/// Adapter exposing an [`Environment`] as a `rand_core` generator.
///
/// The RSA primitives take `CryptoRngCore`; wrapping the caller's environment
/// keeps them on the same injected source as everything else.
pub struct EnvRng<'a, E: Environment> {
    env: &'a E,
}

impl<'a, E: Environment> EnvRng<'a, E> {
    /// Borrow `env` as an RNG for the duration of one operation.
    pub fn new(env: &'a E) -> Self {
        Self { env }
    }
}

impl<E: Environment> RngCore for EnvRng<'_, E> {
    fn next_u32(&mut self) -> u32 {
        u32::from_be_bytes(self.env.random_array())
    }

    fn next_u64(&mut self) -> u64 {
        u64::from_be_bytes(self.env.random_array())
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.env.random_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.env.random_bytes(dest);
        Ok(())
    }
}

impl<E: Environment> CryptoRng for EnvRng<'_, E> {}
