use indicatif::ProgressBar;

use crate::adapters::events::json_event_log::JsonEventLog;
use crate::cli::commands::project::Project;
use crate::cli::output;
use crate::core::errors::Result;
use crate::core::models::registration::RegistrationOutcome;
use crate::core::services::reconciliation::ReconciliationEngine;
use crate::core::traits::observer::RegistrationObserver;

/// Prints each outcome as it happens and forwards it to the event log.
struct ConsoleObserver<'a> {
    progress: &'a ProgressBar,
    events: Option<&'a JsonEventLog>,
}

impl RegistrationObserver for ConsoleObserver<'_> {
    fn on_result(&self, outcome: &RegistrationOutcome) {
        self.progress.suspend(|| match &outcome.failure {
            None => output::success(&format!("{} {}", outcome.action, outcome.account)),
            Some(reason) => output::warning(&format!(
                "{} {} failed: {}",
                outcome.action,
                outcome.account,
                reason.lines().next().unwrap_or_default()
            )),
        });

        if let Some(events) = self.events {
            events.on_result(outcome);
        }
    }
}

/// Execute the `pushguard reconcile` command.
///
/// Runs one reconciliation pass over the configured accounts. Relay
/// failures are reported but do not fail the command; the next pass
/// retries naturally.
pub fn execute(dry_run: bool) -> Result<()> {
    let project = Project::open()?;
    let accounts = project.config.account_ids();

    output::header("pushguard reconcile");

    if accounts.is_empty() {
        output::warning("No accounts configured");
        println!("  Add account ids to the accounts list in config.toml.");
        return Ok(());
    }

    let store = project.store();
    let relay = project.relay_client(dry_run)?;
    let client = relay.client.as_ref();
    let dry = relay.dry_run;
    if dry {
        println!("  Dry run: nothing is sent to the relay.\n");
    }

    // A dry run decides but does not happen, so it leaves no history.
    let events = if dry { None } else { project.event_log() };

    let sp = output::spinner(&format!(
        "Reconciling {} account(s) via {}...",
        accounts.len(),
        client.name()
    ));
    let observer = ConsoleObserver {
        progress: &sp,
        events: events.as_ref(),
    };

    let report = ReconciliationEngine.reconcile(&accounts, &store, client, Some(&observer));

    output::finish_spinner(sp, &format!(
        "{} register and {} unregister call(s)",
        report.registered(),
        report.unregistered()
    ));
    if report.failures() > 0 {
        output::warning(&format!(
            "{} relay call(s) failed; they will be retried on the next pass",
            report.failures()
        ));
    }

    Ok(())
}
