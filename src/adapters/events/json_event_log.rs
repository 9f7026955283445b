use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::core::errors::{PushGuardError, Result};
use crate::core::models::registration::RegistrationOutcome;
use crate::core::models::registration_event::RegistrationEvent;
use crate::core::traits::event_log::EventLog;
use crate::core::traits::observer::RegistrationObserver;

/// Event log that appends entries as JSON lines to a file.
///
/// Also usable as the reconciliation observer: every outcome becomes
/// one line.
pub struct JsonEventLog {
    log_path: PathBuf,
}

impl JsonEventLog {
    /// Create a log that writes to `{dir}/{log_file}`.
    pub fn new(dir: &Path, log_file: &str) -> Self {
        Self {
            log_path: dir.join(log_file),
        }
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }
}

impl EventLog for JsonEventLog {
    fn log_event(&self, entry: &RegistrationEvent) -> Result<()> {
        let line = serde_json::to_string(entry).map_err(|e| PushGuardError::EventLogError {
            detail: format!("Failed to serialize event: {e}"),
        })?;

        if let Some(parent) = self.log_path.parent()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| PushGuardError::EventLogError {
                detail: format!("Cannot open event log at {}: {e}", self.log_path.display()),
            })?;

        writeln!(file, "{line}").map_err(|e| PushGuardError::EventLogError {
            detail: format!("Failed to write event: {e}"),
        })?;

        Ok(())
    }

    fn query(&self, account: Option<&str>, since: Option<DateTime<Utc>>) -> Result<Vec<RegistrationEvent>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = fs::File::open(&self.log_path).map_err(|e| PushGuardError::EventLogError {
            detail: format!("Cannot read event log: {e}"),
        })?;

        let mut entries = Vec::new();
        for (line_num, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| PushGuardError::EventLogError {
                detail: format!("Error reading event log line {}: {e}", line_num + 1),
            })?;

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let entry: RegistrationEvent =
                serde_json::from_str(trimmed).map_err(|e| PushGuardError::EventLogError {
                    detail: format!("Malformed event at line {}: {e}", line_num + 1),
                })?;

            if let Some(account) = account
                && entry.account != account
            {
                continue;
            }

            if let Some(since_date) = since
                && entry.timestamp < since_date
            {
                continue;
            }

            entries.push(entry);
        }

        Ok(entries)
    }
}

impl RegistrationObserver for JsonEventLog {
    /// Logging must not fail the pass, so write errors only warn.
    fn on_result(&self, outcome: &RegistrationOutcome) {
        if let Err(e) = self.log_event(&RegistrationEvent::from_outcome(outcome)) {
            tracing::warn!(account = %outcome.account, error = %e, "could not record registration event");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::account::AccountId;
    use crate::core::models::registration::ReconcileAction;
    use crate::core::models::registration_event::EventSource;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn sample_event(account: &str, source: EventSource) -> RegistrationEvent {
        RegistrationEvent {
            timestamp: Utc::now(),
            account: account.to_string(),
            source,
            action: None,
            success: true,
            detail: None,
        }
    }

    #[test]
    fn log_and_query_round_trip() {
        let tmp = TempDir::new().unwrap();
        let log = JsonEventLog::new(tmp.path(), "events.log");

        log.log_event(&sample_event("alice", EventSource::NewEndpoint)).unwrap();

        let results = log.query(None, None).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].account, "alice");
        assert_eq!(results[0].source, EventSource::NewEndpoint);
    }

    #[test]
    fn filter_by_account_is_exact() {
        let tmp = TempDir::new().unwrap();
        let log = JsonEventLog::new(tmp.path(), "events.log");

        log.log_event(&sample_event("alice", EventSource::Forget)).unwrap();
        log.log_event(&sample_event("alice2", EventSource::Forget)).unwrap();

        let results = log.query(Some("alice"), None).unwrap();
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn filter_by_since() {
        let tmp = TempDir::new().unwrap();
        let log = JsonEventLog::new(tmp.path(), "events.log");

        let old = RegistrationEvent {
            timestamp: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            ..sample_event("alice", EventSource::Reconcile)
        };
        let recent = RegistrationEvent {
            timestamp: Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap(),
            ..sample_event("bob", EventSource::Reconcile)
        };
        log.log_event(&old).unwrap();
        log.log_event(&recent).unwrap();

        let cutoff = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let results = log.query(None, Some(cutoff)).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].account, "bob");
    }

    #[test]
    fn observer_records_outcomes() {
        let tmp = TempDir::new().unwrap();
        let log = JsonEventLog::new(tmp.path(), "events.log");

        log.on_result(&RegistrationOutcome {
            account: AccountId::new("bob"),
            action: ReconcileAction::Unregister,
            failure: Some("HTTP 503".into()),
        });

        let results = log.query(None, None).unwrap();
        assert_eq!(results[0].action, Some(ReconcileAction::Unregister));
        assert!(!results[0].success);
        assert_eq!(results[0].detail.as_deref(), Some("HTTP 503"));
    }

    #[test]
    fn query_nonexistent_file_returns_empty() {
        let log = JsonEventLog::new(Path::new("/nonexistent"), "events.log");
        assert!(log.query(None, None).unwrap().is_empty());
    }

    #[test]
    fn malformed_line_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let log = JsonEventLog::new(tmp.path(), "events.log");
        std::fs::write(log.path(), "{broken\n").unwrap();

        assert!(log.query(None, None).is_err());
    }
}
