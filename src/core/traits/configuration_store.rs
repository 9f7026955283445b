use crate::core::errors::Result;
use crate::core::models::account::AccountId;

/// Port for the per-account key-value store that holds push records.
///
/// Values are opaque bytes; decoding is the caller's concern.
/// The reconciliation engine only ever calls `get`.
pub trait ConfigurationStore: Send + Sync {
    /// Fetch the raw value stored under `(account, key)`, if any.
    fn get(&self, account: &AccountId, key: &str) -> Result<Option<Vec<u8>>>;

    /// Insert or replace the value under `(account, key)`.
    fn put(&self, account: &AccountId, key: &str, value: &[u8]) -> Result<()>;

    /// Remove the value under `(account, key)`. Removing a missing key is not an error.
    fn delete(&self, account: &AccountId, key: &str) -> Result<()>;
}
