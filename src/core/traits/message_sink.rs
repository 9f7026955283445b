use crate::core::errors::Result;
use crate::core::models::account::AccountId;

/// Port for the application logic that consumes trusted push payloads.
pub trait MessageSink: Send + Sync {
    /// Hand over a payload whose signature has already been verified.
    fn deliver(&self, account: &AccountId, payload: &[u8]) -> Result<()>;
}
