//! Primary key certification of sub keys.
//!
//! A certification is a signature by the primary's signing key over the sub
//! key's [`Fingerprint`](crate::Fingerprint). Absent inputs produce the
//! failure value (`None` / `false`) instead of an error.

use crate::{
    error::CryptoError,
    keys::{PrimaryKeyPair, PrimaryPublicKey, PublicKey},
    signature::{Signature, sign, verify},
};

/// Certify `sub_key` with `primary`'s signing key.
///
/// Returns `None` if either input is absent or signing fails.
pub fn certify_sub_key(
    sub_key: Option<&PublicKey>,
    primary: Option<&PrimaryKeyPair>,
) -> Option<Signature> {
    let (sub_key, primary) = (sub_key?, primary?);

    certify(sub_key, primary)
        .inspect_err(|e| tracing::warn!(error = %e, "sub key certification failed"))
        .ok()
}

/// Check that `certification` is `primary`'s signature over `sub_key`.
///
/// Returns false if either key is absent or the signature does not verify.
pub fn validate_sub_key(
    sub_key: Option<&PublicKey>,
    certification: &[u8],
    primary: Option<&PrimaryPublicKey>,
) -> bool {
    let (Some(sub_key), Some(primary)) = (sub_key, primary) else {
        return false;
    };

    verify(sub_key.fingerprint().as_bytes(), certification, &primary.signing)
}

pub(crate) fn certify(
    sub_key: &PublicKey,
    primary: &PrimaryKeyPair,
) -> Result<Signature, CryptoError> {
    sign(sub_key.fingerprint().as_bytes(), primary.signing())
}

#[cfg(test)]
mod tests {
    use std::sync::OnceLock;

    use super::*;
    use crate::{config::CryptoConfig, keys::AsymmetricKeyPair, test_env::SeededEnv};

    struct Fixture {
        primary: PrimaryKeyPair,
        sub: AsymmetricKeyPair,
    }

    fn fixture() -> &'static Fixture {
        static FIXTURE: OnceLock<Fixture> = OnceLock::new();
        FIXTURE.get_or_init(|| {
            let config = CryptoConfig { modulus_bits: 1024 };
            let env = SeededEnv::new(41);
            Fixture {
                primary: PrimaryKeyPair::generate(&config, &env).unwrap(),
                sub: AsymmetricKeyPair::generate(&config, &env).unwrap(),
            }
        })
    }

    #[test]
    fn certify_then_validate() {
        let Fixture { primary, sub } = fixture();

        let certification = certify_sub_key(Some(sub.public()), Some(primary)).unwrap();
        assert!(validate_sub_key(
            Some(sub.public()),
            certification.as_bytes(),
            Some(&primary.public())
        ));
    }

    #[test]
    fn certification_uses_signing_half() {
        let Fixture { primary, sub } = fixture();
        let certification = certify_sub_key(Some(sub.public()), Some(primary)).unwrap();

        assert!(verify(
            sub.public().fingerprint().as_bytes(),
            certification.as_bytes(),
            primary.signing().public()
        ));
        assert!(!verify(
            sub.public().fingerprint().as_bytes(),
            certification.as_bytes(),
            primary.encryption().public()
        ));
    }

    #[test]
    fn different_sub_key_fails_validation() {
        let Fixture { primary, sub } = fixture();
        let certification = certify_sub_key(Some(sub.public()), Some(primary)).unwrap();

        // The primary's own encryption key was never certified
        assert!(!validate_sub_key(
            Some(primary.encryption().public()),
            certification.as_bytes(),
            Some(&primary.public())
        ));
    }

    #[test]
    fn absent_inputs_yield_failure_values() {
        let Fixture { primary, sub } = fixture();

        assert!(certify_sub_key(None, Some(primary)).is_none());
        assert!(certify_sub_key(Some(sub.public()), None).is_none());
        assert!(certify_sub_key(None, None).is_none());

        let certification = certify_sub_key(Some(sub.public()), Some(primary)).unwrap();
        assert!(!validate_sub_key(None, certification.as_bytes(), Some(&primary.public())));
        assert!(!validate_sub_key(Some(sub.public()), certification.as_bytes(), None));
    }

    #[test]
    fn empty_certification_fails_validation() {
        let Fixture { primary, sub } = fixture();
        assert!(!validate_sub_key(Some(sub.public()), &[], Some(&primary.public())));
    }
}
