use crate::cli::commands::event_helpers;
use crate::cli::commands::project::Project;
use crate::cli::output;
use crate::core::errors::Result;
use crate::core::models::account::AccountId;
use crate::core::models::registration_event::EventSource;
use crate::core::services::endpoint_lifecycle::EndpointLifecycle;

/// Execute `pushguard forget <account>`.
///
/// Only flags the record; the relay is contacted by the next reconcile.
pub fn execute(account: &str) -> Result<()> {
    let project = Project::open()?;
    let account = AccountId::parse(account)?;

    let store = project.store();
    let relay = project.relay_client(true)?;
    let lifecycle = EndpointLifecycle {
        store: &store,
        client: relay.client.as_ref(),
    };

    lifecycle.mark_for_deletion(&account)?;
    output::success(&format!("{account} marked for unsubscription"));

    if !project.config.accounts.iter().any(|a| a == account.as_str()) {
        output::warning(&format!("{account} is not in the accounts list"));
        println!("  Only configured accounts are reconciled.");
    } else {
        println!("  Run 'pushguard reconcile' to unregister it from the relay.");
    }

    event_helpers::log_event(&project, &account, EventSource::Forget, None, true, None);
    Ok(())
}
