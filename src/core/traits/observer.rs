use crate::core::models::registration::RegistrationOutcome;

/// Optional channel notified of every register/unregister result.
pub trait RegistrationObserver: Send + Sync {
    fn on_result(&self, outcome: &RegistrationOutcome);
}
