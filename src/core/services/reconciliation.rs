use crate::core::models::account::AccountId;
use crate::core::models::push_configuration::{PUSH_RECORD_KEY, PushConfigurationState};
use crate::core::models::registration::{ReconcileAction, ReconcileReport, RegistrationOutcome};
use crate::core::traits::configuration_store::ConfigurationStore;
use crate::core::traits::observer::RegistrationObserver;
use crate::core::traits::registration_client::PushRegistrationClient;

/// Brings every account's relay subscription in line with its stored
/// desired state.
///
/// Stateless: all collaborators are passed per call, so concurrent passes
/// over disjoint account sets need no coordination here.
pub struct ReconciliationEngine;

impl ReconciliationEngine {
    /// Issue exactly one register-or-unregister call per account, in the
    /// order given.
    ///
    /// An account is unregistered only when a record exists and its
    /// `shouldBeDeleted` flag is set. A missing, unreadable or malformed
    /// record means register. Client failures are reported, never retried.
    pub fn reconcile<S, C>(
        &self,
        accounts: &[AccountId],
        store: &S,
        client: &C,
        observer: Option<&dyn RegistrationObserver>,
    ) -> ReconcileReport
    where
        S: ConfigurationStore + ?Sized,
        C: PushRegistrationClient + ?Sized,
    {
        let mut report = ReconcileReport::default();

        for account in accounts {
            let action = Self::decide(Self::load_state(store, account).as_ref());

            let result = match action {
                ReconcileAction::Register => client.register(account),
                ReconcileAction::Unregister => client.unregister(account),
            };

            let failure = match result {
                Ok(()) => {
                    tracing::debug!(account = %account, %action, client = client.name(), "relay call accepted");
                    None
                }
                Err(e) => {
                    tracing::warn!(account = %account, %action, error = %e, "relay call failed");
                    Some(e.to_string())
                }
            };

            let outcome = RegistrationOutcome {
                account: account.clone(),
                action,
                failure,
            };
            if let Some(observer) = observer {
                observer.on_result(&outcome);
            }
            report.outcomes.push(outcome);
        }

        tracing::info!(
            accounts = accounts.len(),
            registered = report.registered(),
            unregistered = report.unregistered(),
            failures = report.failures(),
            "reconciliation pass finished"
        );
        report
    }

    /// The decision rule: unregister iff a record exists with the flag set.
    pub fn decide(state: Option<&PushConfigurationState>) -> ReconcileAction {
        match state {
            Some(record) if record.should_be_deleted => ReconcileAction::Unregister,
            _ => ReconcileAction::Register,
        }
    }

    /// Read and decode the account's record, folding every failure into
    /// "no record".
    fn load_state<S>(store: &S, account: &AccountId) -> Option<PushConfigurationState>
    where
        S: ConfigurationStore + ?Sized,
    {
        let raw = match store.get(account, PUSH_RECORD_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!(account = %account, error = %e, "push record unreadable, treating as absent");
                return None;
            }
        };

        match PushConfigurationState::decode(account.as_str(), &raw) {
            Ok(state) => Some(state),
            Err(e) => {
                tracing::warn!(account = %account, error = %e, "push record malformed, treating as absent");
                None
            }
        }
    }
}
