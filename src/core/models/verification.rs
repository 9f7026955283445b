/// Outcome of checking one (subject, signature) pair against one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignatureVerification {
    /// The signature was produced by the key's private counterpart over
    /// exactly the subject bytes.
    Valid,
    /// The signature does not match, or could not be decoded.
    Invalid,
    /// No verification key is configured. Callers must treat the payload
    /// as untrusted.
    KeyUnavailable,
}

impl SignatureVerification {
    /// Only a `Valid` verdict makes a payload trustworthy.
    pub fn is_trusted(self) -> bool {
        matches!(self, Self::Valid)
    }
}

impl std::fmt::Display for SignatureVerification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Valid => "valid",
            Self::Invalid => "invalid",
            Self::KeyUnavailable => "key unavailable",
        };
        f.write_str(label)
    }
}
