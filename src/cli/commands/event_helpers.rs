use chrono::Utc;

use crate::cli::commands::project::Project;
use crate::cli::output;
use crate::core::models::account::AccountId;
use crate::core::models::registration::ReconcileAction;
use crate::core::models::registration_event::{EventSource, RegistrationEvent};
use crate::core::traits::event_log::EventLog;

/// Record a lifecycle event. Warns on failure instead of propagating
/// the error, since history must not block the main operation.
pub fn log_event(
    project: &Project,
    account: &AccountId,
    source: EventSource,
    action: Option<ReconcileAction>,
    success: bool,
    detail: Option<String>,
) {
    let Some(log) = project.event_log() else {
        return;
    };

    let entry = RegistrationEvent {
        timestamp: Utc::now(),
        account: account.to_string(),
        source,
        action,
        success,
        detail,
    };

    if let Err(e) = log.log_event(&entry) {
        output::warning(&format!("Could not write event log: {e}"));
    }
}
