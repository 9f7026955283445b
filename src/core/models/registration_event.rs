use serde::{Deserialize, Serialize};

use crate::core::models::registration::{ReconcileAction, RegistrationOutcome};

/// What triggered a recorded registration event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventSource {
    Reconcile,
    NewEndpoint,
    RegistrationFailed,
    Unregistered,
    Forget,
}

/// A single entry in the registration event log (JSON lines format).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationEvent {
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub account: String,
    pub source: EventSource,
    pub action: Option<ReconcileAction>,
    pub success: bool,
    pub detail: Option<String>,
}

impl RegistrationEvent {
    /// Event for the outcome of a reconciliation call.
    pub fn from_outcome(outcome: &RegistrationOutcome) -> Self {
        Self {
            timestamp: chrono::Utc::now(),
            account: outcome.account.to_string(),
            source: EventSource::Reconcile,
            action: Some(outcome.action),
            success: outcome.succeeded(),
            detail: outcome.failure.clone(),
        }
    }
}
