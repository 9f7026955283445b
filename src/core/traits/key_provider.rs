use crate::core::errors::Result;
use crate::core::models::verification_key::VerificationKey;

/// Port for the source of verification key material.
pub trait KeyProvider: Send + Sync {
    /// The key inbound payloads are currently checked against.
    ///
    /// `Ok(None)` means no key has been provisioned yet.
    fn current_verification_key(&self) -> Result<Option<VerificationKey>>;
}

/// A key read once and held, so every lookup in one operation agrees.
impl KeyProvider for Option<VerificationKey> {
    fn current_verification_key(&self) -> Result<Option<VerificationKey>> {
        Ok(self.clone())
    }
}
