use serde::{Deserialize, Serialize};

use crate::core::models::account::AccountId;

/// The corrective call issued for one account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconcileAction {
    Register,
    Unregister,
}

impl std::fmt::Display for ReconcileAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Register => f.write_str("register"),
            Self::Unregister => f.write_str("unregister"),
        }
    }
}

/// Result of one register/unregister call, as handed to observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationOutcome {
    pub account: AccountId,
    pub action: ReconcileAction,
    /// `None` when the client accepted the call, otherwise the client's
    /// error message.
    pub failure: Option<String>,
}

impl RegistrationOutcome {
    pub fn succeeded(&self) -> bool {
        self.failure.is_none()
    }
}

/// Everything one reconciliation pass did, in enumeration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub outcomes: Vec<RegistrationOutcome>,
}

impl ReconcileReport {
    pub fn registered(&self) -> usize {
        self.count(ReconcileAction::Register)
    }

    pub fn unregistered(&self) -> usize {
        self.count(ReconcileAction::Unregister)
    }

    pub fn failures(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.succeeded()).count()
    }

    fn count(&self, action: ReconcileAction) -> usize {
        self.outcomes.iter().filter(|o| o.action == action).count()
    }
}
