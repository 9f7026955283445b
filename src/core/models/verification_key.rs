use base64::{Engine, engine::general_purpose::STANDARD};
use p256::ecdsa::signature::Verifier;
use sha2::{Digest, Sha256};

use crate::core::errors::{PushGuardError, Result};

/// Signature scheme carried by a verification key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyScheme {
    Ed25519,
    /// ECDSA over NIST P-256 with SHA-256.
    P256,
}

impl KeyScheme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ed25519 => "ed25519",
            Self::P256 => "p256",
        }
    }
}

impl std::fmt::Display for KeyScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Public key used to authenticate inbound push payloads.
///
/// Textual form: `<scheme>:<base64>`, where the base64 part is the raw
/// 32-byte Ed25519 key or a SEC1-encoded P-256 point.
///
/// ```text
/// ed25519:11qYAYKxCrfVS/7TyWQHOg7hcvPapiMlrwIaaPcHURo=
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationKey {
    Ed25519(ed25519_dalek::VerifyingKey),
    P256(p256::ecdsa::VerifyingKey),
}

impl VerificationKey {
    /// Parse the textual `<scheme>:<base64>` form.
    pub fn parse(text: &str) -> Result<Self> {
        let (scheme, encoded) =
            text.trim()
                .split_once(':')
                .ok_or_else(|| PushGuardError::InvalidKey {
                    reason: "missing '<scheme>:' prefix".into(),
                })?;

        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|e| PushGuardError::InvalidKey {
                reason: format!("key is not valid base64: {e}"),
            })?;

        match scheme.trim().to_ascii_lowercase().as_str() {
            "ed25519" => Self::ed25519_from_bytes(&bytes),
            "p256" => Self::p256_from_sec1(&bytes),
            other => Err(PushGuardError::InvalidKey {
                reason: format!("unsupported scheme '{other}'"),
            }),
        }
    }

    /// Build an Ed25519 key from its 32 raw bytes.
    pub fn ed25519_from_bytes(bytes: &[u8]) -> Result<Self> {
        let raw: &[u8; 32] = bytes.try_into().map_err(|_| PushGuardError::InvalidKey {
            reason: format!("ed25519 keys are 32 bytes, got {}", bytes.len()),
        })?;
        ed25519_dalek::VerifyingKey::from_bytes(raw)
            .map(Self::Ed25519)
            .map_err(|e| PushGuardError::InvalidKey {
                reason: format!("not a valid ed25519 point: {e}"),
            })
    }

    /// Build a P-256 key from a SEC1 point (compressed or uncompressed).
    pub fn p256_from_sec1(bytes: &[u8]) -> Result<Self> {
        p256::ecdsa::VerifyingKey::from_sec1_bytes(bytes)
            .map(Self::P256)
            .map_err(|e| PushGuardError::InvalidKey {
                reason: format!("not a valid SEC1 P-256 point: {e}"),
            })
    }

    pub fn scheme(&self) -> KeyScheme {
        match self {
            Self::Ed25519(_) => KeyScheme::Ed25519,
            Self::P256(_) => KeyScheme::P256,
        }
    }

    /// Raw public key bytes (uncompressed SEC1 for P-256).
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Self::Ed25519(vk) => vk.as_bytes().to_vec(),
            Self::P256(vk) => vk.to_encoded_point(false).as_bytes().to_vec(),
        }
    }

    /// Textual form accepted by [`VerificationKey::parse`].
    pub fn to_text(&self) -> String {
        format!("{}:{}", self.scheme(), STANDARD.encode(self.to_bytes()))
    }

    /// Short SHA-256 fingerprint for log lines. Not a security boundary.
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.to_bytes());
        let hex = format!("{digest:x}");
        hex[..16].to_string()
    }

    /// Check `signature` over exactly `subject` with this key's scheme.
    ///
    /// Signatures are the fixed 64-byte encodings (`R || S` for Ed25519,
    /// `r || s` for P-256). Anything else fails. P-256 signatures must be
    /// low-S: the malleated `(r, n - s)` twin of a valid signature is
    /// rejected, matching ed25519 `verify_strict`.
    pub(crate) fn verifies(&self, subject: &[u8], signature: &[u8]) -> bool {
        match self {
            Self::Ed25519(vk) => ed25519_dalek::Signature::from_slice(signature)
                .and_then(|sig| vk.verify_strict(subject, &sig))
                .is_ok(),
            Self::P256(vk) => match p256::ecdsa::Signature::from_slice(signature) {
                Ok(sig) if sig.normalize_s().is_none() => vk.verify(subject, &sig).is_ok(),
                _ => false,
            },
        }
    }
}
