//! Property-based tests for sealed envelopes
//!
//! These tests verify the fundamental invariants of the envelope codec:
//!
//! 1. **Round-trip**: open(seal(m)) == m for all messages
//! 2. **Tamper detection**: flipping any single byte is rejected
//! 3. **Length floor**: short buffers fail as malformed, never panic

use proptest::prelude::*;
use sealbox_crypto::{
    CryptoError, EnvelopeLayout, decrypt_message, encrypt_message, open, seal,
};
use sealbox_harness::{
    SeededEnv,
    fixtures::{alice, bob},
};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_text_roundtrip(message in ".{0,512}", seed in any::<u64>()) {
        let env = SeededEnv::new(seed);
        let envelope =
            encrypt_message(&message, &bob().public().encryption, alice().signing(), &env).unwrap();
        let opened =
            decrypt_message(&envelope, bob().encryption(), &alice().public().signing, &env).unwrap();

        prop_assert_eq!(opened, message);
    }

    #[test]
    fn prop_bytes_roundtrip(
        message in prop::collection::vec(any::<u8>(), 0..2048),
        seed in any::<u64>(),
    ) {
        let env = SeededEnv::new(seed);
        let envelope = seal(&message, &bob().public().encryption, alice().signing(), &env).unwrap();

        let layout = EnvelopeLayout::for_keys(&bob().public().encryption, &alice().public().signing);
        prop_assert_eq!(envelope.len(), layout.envelope_len(message.len()));

        let opened = open(&envelope, bob().encryption(), &alice().public().signing, &env).unwrap();
        prop_assert_eq!(opened, message);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_single_byte_tamper_is_rejected(
        message in prop::collection::vec(any::<u8>(), 0..64),
        position in any::<prop::sample::Index>(),
        flip in 1u8..=255,
        seed in any::<u64>(),
    ) {
        let env = SeededEnv::new(seed);
        let mut envelope =
            seal(&message, &bob().public().encryption, alice().signing(), &env).unwrap();

        let index = position.index(envelope.len());
        envelope[index] ^= flip;

        let result = open(&envelope, bob().encryption(), &alice().public().signing, &env);
        prop_assert_eq!(result, Err(CryptoError::SignatureInvalid), "byte {}", index);
    }

    #[test]
    fn prop_short_buffers_are_malformed(
        buffer in prop::collection::vec(any::<u8>(), 0..528),
    ) {
        let env = SeededEnv::new(0);
        let result = open(&buffer, bob().encryption(), &alice().public().signing, &env);

        prop_assert_eq!(result, Err(CryptoError::MalformedEnvelope { len: buffer.len(), min: 528 }));
    }

    #[test]
    fn prop_arbitrary_buffers_never_open(
        buffer in prop::collection::vec(any::<u8>(), 528..1200),
    ) {
        let env = SeededEnv::new(0);
        let result = open(&buffer, bob().encryption(), &alice().public().signing, &env);

        prop_assert_eq!(result, Err(CryptoError::SignatureInvalid));
    }
}
