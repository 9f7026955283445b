use crate::cli::EndpointAction;
use crate::cli::commands::event_helpers;
use crate::cli::commands::project::Project;
use crate::cli::output;
use crate::core::errors::Result;
use crate::core::models::account::AccountId;
use crate::core::models::registration::ReconcileAction;
use crate::core::models::registration_event::EventSource;
use crate::core::services::endpoint_lifecycle::EndpointLifecycle;

/// Execute `pushguard endpoint <action>`.
pub fn execute(action: &EndpointAction) -> Result<()> {
    let project = Project::open()?;
    let store = project.store();
    let relay = project.relay_client(false)?;
    let lifecycle = EndpointLifecycle {
        store: &store,
        client: relay.client.as_ref(),
    };

    match action {
        EndpointAction::New { account, endpoint } => {
            let account = AccountId::parse(account)?;
            lifecycle.on_new_endpoint(&account, endpoint)?;
            output::success(&format!("Stored new endpoint for {account}"));
            event_helpers::log_event(
                &project,
                &account,
                EventSource::NewEndpoint,
                None,
                true,
                Some(endpoint.clone()),
            );
        }
        EndpointAction::Failed { account } => {
            let account = AccountId::parse(account)?;
            let failure = lifecycle.on_registration_failed(&account)?;
            output::warning(&format!("Registration failed for {account}; record cleared"));
            report_relay_failure(failure.as_deref());
            println!("  The next 'pushguard reconcile' registers it again.");
            event_helpers::log_event(
                &project,
                &account,
                EventSource::RegistrationFailed,
                Some(ReconcileAction::Unregister),
                failure.is_none(),
                failure,
            );
        }
        EndpointAction::Unregistered { account } => {
            let account = AccountId::parse(account)?;
            let failure = lifecycle.on_unregistered(&account)?;
            output::success(&format!("{account} unregistered; record cleared"));
            report_relay_failure(failure.as_deref());
            event_helpers::log_event(
                &project,
                &account,
                EventSource::Unregistered,
                Some(ReconcileAction::Unregister),
                failure.is_none(),
                failure,
            );
        }
    }

    Ok(())
}

fn report_relay_failure(failure: Option<&str>) {
    if let Some(reason) = failure {
        output::warning(&format!(
            "Relay unregister failed: {}",
            reason.lines().next().unwrap_or_default()
        ));
    }
}
