use crate::core::errors::Result;
use crate::core::models::account::AccountId;

/// Port for the transport that subscribes or unsubscribes an account
/// with the push relay.
///
/// Both calls must be idempotent: calling `register` for an account
/// that is already registered is a no-op on the relay side.
pub trait PushRegistrationClient: Send + Sync {
    fn register(&self, account: &AccountId) -> Result<()>;

    fn unregister(&self, account: &AccountId) -> Result<()>;

    /// Human-readable name of this client (e.g. "http", "dry-run").
    fn name(&self) -> &str;
}
