use crate::core::errors::Result;
use crate::core::models::account::AccountId;
use crate::core::traits::registration_client::PushRegistrationClient;

/// Client that only logs what it would have sent. Used by
/// `pushguard reconcile --dry-run` and when no relay is configured.
#[derive(Default)]
pub struct DryRunClient;

impl PushRegistrationClient for DryRunClient {
    fn register(&self, account: &AccountId) -> Result<()> {
        tracing::info!(account = %account, "dry run: would register");
        Ok(())
    }

    fn unregister(&self, account: &AccountId) -> Result<()> {
        tracing::info!(account = %account, "dry run: would unregister");
        Ok(())
    }

    fn name(&self) -> &str {
        "dry-run"
    }
}
