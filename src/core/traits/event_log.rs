use crate::core::errors::Result;
use crate::core::models::registration_event::RegistrationEvent;

/// Port for recording and querying registration events.
pub trait EventLog: Send + Sync {
    /// Append an entry to the log.
    fn log_event(&self, entry: &RegistrationEvent) -> Result<()>;

    /// Query all entries, optionally filtered.
    fn query(
        &self,
        account: Option<&str>,
        since: Option<chrono::DateTime<chrono::Utc>>,
    ) -> Result<Vec<RegistrationEvent>>;
}
