//! Fuzz target for envelope opening
//!
//! Tests the envelope parser and verify-then-decrypt pipeline under
//! adversarial inputs.
//!
//! # Strategy
//!
//! - Raw arbitrary buffers (below, at and above the length floor)
//! - Single-byte mutations of a valid envelope
//! - Truncations of a valid envelope
//!
//! # Invariants
//!
//! - `open` never panics
//! - Every failure is a rejection, never a fatal error
//! - Only the untouched envelope opens, and it yields the original message

#![no_main]

use std::sync::OnceLock;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sealbox_crypto::{CryptoConfig, PrimaryKeyPair, open, seal};
use sealbox_harness::SeededEnv;

struct Parties {
    sender: PrimaryKeyPair,
    recipient: PrimaryKeyPair,
    envelope: Vec<u8>,
}

#[derive(Debug, Arbitrary)]
enum Input {
    Raw(Vec<u8>),
    Mutate { index: usize, xor: u8 },
    Truncate { keep: usize },
}

fn parties() -> &'static Parties {
    static PARTIES: OnceLock<Parties> = OnceLock::new();
    PARTIES.get_or_init(|| {
        // 1024-bit keys keep iterations fast; layout logic is size-independent
        let config = CryptoConfig { modulus_bits: 1024 };
        let env = SeededEnv::new(0xF022);
        let sender = PrimaryKeyPair::generate(&config, &env).unwrap();
        let recipient = PrimaryKeyPair::generate(&config, &env).unwrap();
        let envelope =
            seal(b"fuzz corpus seed", &recipient.public().encryption, sender.signing(), &env)
                .unwrap();
        Parties { sender, recipient, envelope }
    })
}

fuzz_target!(|input: Input| {
    let parties = parties();
    let env = SeededEnv::new(1);

    let buffer = match input {
        Input::Raw(bytes) => bytes,
        Input::Mutate { index, xor } => {
            let mut bytes = parties.envelope.clone();
            let index = index % bytes.len();
            bytes[index] ^= xor;
            bytes
        },
        Input::Truncate { keep } => {
            parties.envelope[..keep % (parties.envelope.len() + 1)].to_vec()
        },
    };

    let result = open(
        &buffer,
        parties.recipient.encryption(),
        parties.sender.signing().public(),
        &env,
    );

    match result {
        Ok(message) => {
            assert_eq!(buffer, parties.envelope, "only the untouched envelope may open");
            assert_eq!(message, b"fuzz corpus seed");
        },
        Err(err) => assert!(err.is_rejection(), "unexpected error kind: {err:?}"),
    }
});
