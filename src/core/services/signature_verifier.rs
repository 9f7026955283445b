use crate::core::models::verification::SignatureVerification;
use crate::core::models::verification_key::VerificationKey;
use crate::core::traits::key_provider::KeyProvider;

/// Checks that a push payload was signed by the holder of a trusted key.
///
/// Pure and stateless: no key lookup, no caching of verdicts. The
/// signature scheme is whatever the key carries.
pub struct SignatureVerifier;

impl SignatureVerifier {
    /// Verify `signature` over exactly `subject`.
    ///
    /// Without a key the verdict is `KeyUnavailable`, never `Valid`.
    pub fn verify(
        &self,
        subject: &[u8],
        signature: &[u8],
        key: Option<&VerificationKey>,
    ) -> SignatureVerification {
        let Some(key) = key else {
            return SignatureVerification::KeyUnavailable;
        };

        if key.verifies(subject, signature) {
            SignatureVerification::Valid
        } else {
            SignatureVerification::Invalid
        }
    }

    /// Verify against the provider's current key.
    ///
    /// A provider that fails to produce a key counts as no key at all.
    pub fn verify_with<P>(
        &self,
        provider: &P,
        subject: &[u8],
        signature: &[u8],
    ) -> SignatureVerification
    where
        P: KeyProvider + ?Sized,
    {
        let key = match provider.current_verification_key() {
            Ok(key) => key,
            Err(e) => {
                tracing::warn!(error = %e, "verification key unavailable");
                None
            }
        };

        let verdict = self.verify(subject, signature, key.as_ref());
        tracing::debug!(
            %verdict,
            key = key.as_ref().map(VerificationKey::fingerprint).as_deref().unwrap_or("none"),
            subject_len = subject.len(),
            "signature checked"
        );
        verdict
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::StaticKeyProvider;
    use ed25519_dalek::Signer as _;
    use p256::ecdsa::signature::Signer as _;

    const SUBJECT: &[u8] = b"{\"app\":\"files\",\"subject\":\"New comment on report.pdf\"}";

    fn ed25519_pair() -> (ed25519_dalek::SigningKey, VerificationKey) {
        let sk = ed25519_dalek::SigningKey::from_bytes(&[42u8; 32]);
        let vk = VerificationKey::Ed25519(sk.verifying_key());
        (sk, vk)
    }

    fn p256_pair() -> (p256::ecdsa::SigningKey, VerificationKey) {
        let sk = p256::ecdsa::SigningKey::from_slice(&[17u8; 32]).unwrap();
        let vk = VerificationKey::P256(sk.verifying_key().clone());
        (sk, vk)
    }

    fn ed25519_sign(sk: &ed25519_dalek::SigningKey, msg: &[u8]) -> Vec<u8> {
        sk.sign(msg).to_bytes().to_vec()
    }

    /// Low-S P-256 signature, the only form accepted.
    fn p256_sign(sk: &p256::ecdsa::SigningKey, msg: &[u8]) -> Vec<u8> {
        let sig: p256::ecdsa::Signature = sk.sign(msg);
        sig.normalize_s().unwrap_or(sig).to_bytes().to_vec()
    }

    /// Every single-bit variant of `bytes`.
    fn bit_flips(bytes: &[u8]) -> impl Iterator<Item = Vec<u8>> + '_ {
        (0..bytes.len() * 8).map(move |bit| {
            let mut flipped = bytes.to_vec();
            flipped[bit / 8] ^= 1 << (bit % 8);
            flipped
        })
    }

    #[test]
    fn ed25519_valid_signature() {
        let (sk, vk) = ed25519_pair();
        let sig = ed25519_sign(&sk, SUBJECT);
        assert_eq!(
            SignatureVerifier.verify(SUBJECT, &sig, Some(&vk)),
            SignatureVerification::Valid
        );
    }

    #[test]
    fn p256_valid_signature() {
        let (sk, vk) = p256_pair();
        let sig = p256_sign(&sk, SUBJECT);
        assert_eq!(
            SignatureVerifier.verify(SUBJECT, &sig, Some(&vk)),
            SignatureVerification::Valid
        );
    }

    #[test]
    fn absent_key_is_key_unavailable_for_any_input() {
        let (sk, _) = ed25519_pair();
        let sig = ed25519_sign(&sk, SUBJECT);
        for (subject, signature) in [
            (SUBJECT, sig.as_slice()),
            (b"".as_slice(), b"".as_slice()),
            (b"garbage".as_slice(), [0u8; 64].as_slice()),
        ] {
            assert_eq!(
                SignatureVerifier.verify(subject, signature, None),
                SignatureVerification::KeyUnavailable
            );
        }
    }

    #[test]
    fn verdict_is_deterministic() {
        let (sk, vk) = p256_pair();
        let sig = p256_sign(&sk, SUBJECT);
        let first = SignatureVerifier.verify(SUBJECT, &sig, Some(&vk));
        let second = SignatureVerifier.verify(SUBJECT, &sig, Some(&vk));
        assert_eq!(first, second);

        let bad = SignatureVerifier.verify(b"other", &sig, Some(&vk));
        assert_eq!(bad, SignatureVerifier.verify(b"other", &sig, Some(&vk)));
    }

    #[test]
    fn ed25519_any_flipped_bit_is_invalid() {
        let (sk, vk) = ed25519_pair();
        let sig = ed25519_sign(&sk, SUBJECT);

        for subject in bit_flips(SUBJECT) {
            assert_eq!(
                SignatureVerifier.verify(&subject, &sig, Some(&vk)),
                SignatureVerification::Invalid
            );
        }
        for signature in bit_flips(&sig) {
            assert_eq!(
                SignatureVerifier.verify(SUBJECT, &signature, Some(&vk)),
                SignatureVerification::Invalid
            );
        }
    }

    #[test]
    fn p256_any_flipped_bit_is_invalid() {
        let (sk, vk) = p256_pair();
        let sig = p256_sign(&sk, SUBJECT);

        for subject in bit_flips(SUBJECT) {
            assert_eq!(
                SignatureVerifier.verify(&subject, &sig, Some(&vk)),
                SignatureVerification::Invalid
            );
        }
        for signature in bit_flips(&sig) {
            assert_eq!(
                SignatureVerifier.verify(SUBJECT, &signature, Some(&vk)),
                SignatureVerification::Invalid
            );
        }
    }

    #[test]
    fn prefix_and_extension_of_subject_are_invalid() {
        let (sk, vk) = ed25519_pair();
        let sig = ed25519_sign(&sk, SUBJECT);

        let prefix = &SUBJECT[..SUBJECT.len() - 1];
        let mut extended = SUBJECT.to_vec();
        extended.push(b'\n');

        assert_eq!(
            SignatureVerifier.verify(prefix, &sig, Some(&vk)),
            SignatureVerification::Invalid
        );
        assert_eq!(
            SignatureVerifier.verify(&extended, &sig, Some(&vk)),
            SignatureVerification::Invalid
        );
    }

    #[test]
    fn wrong_length_signature_is_invalid() {
        let (_, vk) = ed25519_pair();
        for len in [0, 1, 63, 65, 128] {
            assert_eq!(
                SignatureVerifier.verify(SUBJECT, &vec![1u8; len], Some(&vk)),
                SignatureVerification::Invalid
            );
        }
    }

    #[test]
    fn signature_from_another_key_is_invalid() {
        let (sk, _) = ed25519_pair();
        let other = ed25519_dalek::SigningKey::from_bytes(&[43u8; 32]);
        let other_vk = VerificationKey::Ed25519(other.verifying_key());
        let sig = ed25519_sign(&sk, SUBJECT);

        assert_eq!(
            SignatureVerifier.verify(SUBJECT, &sig, Some(&other_vk)),
            SignatureVerification::Invalid
        );
    }

    #[test]
    fn p256_high_s_twin_is_invalid() {
        let (sk, vk) = p256_pair();
        let low = p256::ecdsa::Signature::from_slice(&p256_sign(&sk, SUBJECT)).unwrap();
        let (r, s) = low.split_scalars();
        let high = p256::ecdsa::Signature::from_scalars(r, -s).unwrap();

        assert_eq!(
            SignatureVerifier.verify(SUBJECT, &low.to_bytes(), Some(&vk)),
            SignatureVerification::Valid
        );
        assert_eq!(
            SignatureVerifier.verify(SUBJECT, &high.to_bytes(), Some(&vk)),
            SignatureVerification::Invalid
        );
    }

    #[test]
    fn signature_checked_under_another_scheme_is_invalid() {
        let (sk, _) = ed25519_pair();
        let (_, p256_vk) = p256_pair();
        let sig = ed25519_sign(&sk, SUBJECT);

        assert_eq!(
            SignatureVerifier.verify(SUBJECT, &sig, Some(&p256_vk)),
            SignatureVerification::Invalid
        );
    }

    #[test]
    fn verify_with_uses_provider_key() {
        let (sk, vk) = ed25519_pair();
        let sig = ed25519_sign(&sk, SUBJECT);
        let provider = StaticKeyProvider::Key(vk);

        assert_eq!(
            SignatureVerifier.verify_with(&provider, SUBJECT, &sig),
            SignatureVerification::Valid
        );
    }

    #[test]
    fn verify_with_empty_provider_fails_closed() {
        let (sk, _) = ed25519_pair();
        let sig = ed25519_sign(&sk, SUBJECT);

        assert_eq!(
            SignatureVerifier.verify_with(&StaticKeyProvider::Empty, SUBJECT, &sig),
            SignatureVerification::KeyUnavailable
        );
    }

    #[test]
    fn verify_with_broken_provider_fails_closed() {
        let (sk, _) = ed25519_pair();
        let sig = ed25519_sign(&sk, SUBJECT);

        let verdict = SignatureVerifier.verify_with(&StaticKeyProvider::Broken, SUBJECT, &sig);
        assert_eq!(verdict, SignatureVerification::KeyUnavailable);
        assert!(!verdict.is_trusted());
    }
}
