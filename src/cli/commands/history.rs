use chrono::{NaiveDate, TimeZone, Utc};
use colored::Colorize;

use crate::cli::commands::project::Project;
use crate::cli::output;
use crate::core::errors::{PushGuardError, Result};
use crate::core::models::registration::ReconcileAction;
use crate::core::models::registration_event::{EventSource, RegistrationEvent};
use crate::core::traits::event_log::EventLog;

/// Execute the `pushguard history` command.
///
/// Displays the registration event log with optional filters for
/// account, date and entry count.
pub fn execute(account: Option<&str>, since: Option<&str>, last: Option<usize>) -> Result<()> {
    let project = Project::open()?;

    let Some(log) = project.event_log() else {
        output::header("pushguard history");
        output::warning("Event logging is disabled in config.toml");
        return Ok(());
    };

    let since_dt = since.map(parse_since).transpose()?;
    let entries = log.query(account, since_dt)?;

    if entries.is_empty() {
        output::header("pushguard history");
        output::warning("No registration events found");
        if account.is_some() || since.is_some() {
            println!("  Try removing filters to see all entries.");
        }
        return Ok(());
    }

    let skip = last.map(|n| entries.len().saturating_sub(n)).unwrap_or(0);
    let display = &entries[skip..];

    output::header(&format!("pushguard history ({} entries)", display.len()));
    println!();

    for entry in display {
        print_entry(entry);
    }

    Ok(())
}

/// Parse a date string (ISO 8601: `YYYY-MM-DD`) into a UTC DateTime.
fn parse_since(s: &str) -> Result<chrono::DateTime<Utc>> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| PushGuardError::InvalidConfig {
            detail: format!("Invalid date format: '{s}'. Expected ISO 8601 (YYYY-MM-DD), e.g. 2026-01-15"),
        })
        .map(|d| Utc.from_utc_datetime(&d.and_hms_opt(0, 0, 0).expect("midnight is always valid")))
}

fn print_entry(entry: &RegistrationEvent) {
    let date = entry.timestamp.format("%Y-%m-%d %H:%M:%S");
    let status = if entry.success {
        "ok".green().to_string()
    } else {
        "failed".red().to_string()
    };
    let detail = entry.detail.as_deref().unwrap_or("").dimmed().to_string();

    println!(
        "  {} {} {:<20} {:<22} {} {}",
        date.to_string().dimmed(),
        "│".dimmed(),
        entry.account,
        format_event(entry.source, entry.action),
        status,
        detail,
    );
}

fn format_event(source: EventSource, action: Option<ReconcileAction>) -> String {
    match (source, action) {
        (EventSource::Reconcile, Some(ReconcileAction::Register)) => "register".green().to_string(),
        (EventSource::Reconcile, Some(ReconcileAction::Unregister)) => "unregister".red().to_string(),
        (EventSource::Reconcile, None) => "reconcile".cyan().to_string(),
        (EventSource::NewEndpoint, _) => "new endpoint".cyan().to_string(),
        (EventSource::RegistrationFailed, _) => "registration failed".yellow().to_string(),
        (EventSource::Unregistered, _) => "unregistered".yellow().to_string(),
        (EventSource::Forget, _) => "forget".blue().to_string(),
    }
}
