use crate::core::errors::Result;
use crate::core::models::account::AccountId;
use crate::core::models::push_configuration::{PUSH_RECORD_KEY, PushConfigurationState};
use crate::core::traits::configuration_store::ConfigurationStore;
use crate::core::traits::registration_client::PushRegistrationClient;

/// Reacts to push distributor events by maintaining each account's record.
///
/// This is the writer side of the push record; the reconciliation engine
/// only reads what this service leaves behind.
pub struct EndpointLifecycle<'a, S: ConfigurationStore + ?Sized, C: PushRegistrationClient + ?Sized> {
    pub store: &'a S,
    pub client: &'a C,
}

impl<S: ConfigurationStore + ?Sized, C: PushRegistrationClient + ?Sized> EndpointLifecycle<'_, S, C> {
    /// The distributor issued a new endpoint: store a fresh record
    /// carrying it, replacing any previous one.
    pub fn on_new_endpoint(&self, account: &AccountId, endpoint: &str) -> Result<()> {
        let record = PushConfigurationState::with_endpoint(endpoint);
        self.store.put(account, PUSH_RECORD_KEY, &record.encode()?)?;
        tracing::info!(account = %account, "stored new push endpoint");
        Ok(())
    }

    /// Registration could not complete (e.g. no network). Drop it so the
    /// next reconciliation pass registers again from scratch.
    ///
    /// Returns the relay's error if its unregister call failed; the record
    /// is cleared either way.
    pub fn on_registration_failed(&self, account: &AccountId) -> Result<Option<String>> {
        tracing::warn!(account = %account, "push registration failed, clearing record");
        self.drop_registration(account)
    }

    /// The relay unregistered this device remotely. Same return as
    /// [`EndpointLifecycle::on_registration_failed`].
    pub fn on_unregistered(&self, account: &AccountId) -> Result<Option<String>> {
        tracing::info!(account = %account, "unregistered remotely, clearing record");
        self.drop_registration(account)
    }

    /// Flag the account so the next reconciliation pass unsubscribes it.
    ///
    /// Keeps any existing endpoint. An unreadable record is replaced.
    pub fn mark_for_deletion(&self, account: &AccountId) -> Result<()> {
        let mut record = self
            .store
            .get(account, PUSH_RECORD_KEY)?
            .and_then(|raw| PushConfigurationState::decode(account.as_str(), &raw).ok())
            .unwrap_or_default();
        record.should_be_deleted = true;
        self.store.put(account, PUSH_RECORD_KEY, &record.encode()?)?;
        tracing::info!(account = %account, "account marked for push unsubscription");
        Ok(())
    }

    fn drop_registration(&self, account: &AccountId) -> Result<Option<String>> {
        let failure = match self.client.unregister(account) {
            Ok(()) => None,
            Err(e) => {
                tracing::warn!(account = %account, error = %e, "relay unregister failed");
                Some(e.to_string())
            }
        };
        self.store.delete(account, PUSH_RECORD_KEY)?;
        Ok(failure)
    }
}
