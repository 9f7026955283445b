use colored::Colorize;

use crate::cli::commands::project::Project;
use crate::cli::output;
use crate::core::errors::Result;
use crate::core::models::push_configuration::{PUSH_RECORD_KEY, PushConfigurationState};
use crate::core::models::registration::ReconcileAction;
use crate::core::services::reconciliation::ReconciliationEngine;
use crate::core::traits::configuration_store::ConfigurationStore;
use crate::core::traits::key_provider::KeyProvider;

/// Execute the `pushguard status` command.
///
/// Shows the relay, the verification key and, per configured account,
/// the stored record and what the next reconcile would do with it.
pub fn execute() -> Result<()> {
    let project = Project::open()?;
    let config = &project.config;

    output::header(&format!("pushguard v{}", env!("CARGO_PKG_VERSION")));
    println!("  Config: {}", project.dir().join("config.toml").display());
    match &config.relay {
        Some(relay) => println!("  Relay: {}", relay.url.cyan()),
        None => println!("  Relay: {}", "not configured (dry run)".dimmed()),
    }

    print_key(&project);
    print_accounts(&project);
    print_files(&project);

    Ok(())
}

fn print_key(project: &Project) {
    println!("\n{}", "  Verification key".bold());

    let provider = match project.key_provider() {
        Ok(p) => p,
        Err(_) => {
            output::warning("Could not determine key location");
            return;
        }
    };

    match provider.current_verification_key() {
        Ok(Some(key)) => {
            output::success(&format!("{} key {}", key.scheme(), key.fingerprint()));
            println!("  {}", key.to_text().dimmed());
            println!("  File: {}", provider.path().display());
        }
        Ok(None) => {
            output::warning(&format!("No key at {}", provider.path().display()));
            println!("  Inbound payloads are rejected until a key is installed.");
        }
        Err(e) => output::warning(&format!("Key file unusable: {e}")),
    }
}

fn print_accounts(project: &Project) {
    let accounts = project.config.account_ids();
    println!("\n{}", format!("  Accounts ({})", accounts.len()).bold());

    if accounts.is_empty() {
        output::warning("No accounts configured");
        return;
    }

    let store = project.store();
    for account in &accounts {
        let (state, note) = match store.get(account, PUSH_RECORD_KEY) {
            Ok(Some(raw)) => match PushConfigurationState::decode(account.as_str(), &raw) {
                Ok(record) => {
                    let endpoint = if record.push_token.is_empty() {
                        "no endpoint".to_string()
                    } else {
                        record.push_token.clone()
                    };
                    (Some(record), endpoint)
                }
                Err(_) => (None, "malformed record".to_string()),
            },
            Ok(None) => (None, "no record".to_string()),
            Err(_) => (None, "store unreadable".to_string()),
        };

        let next = match ReconciliationEngine::decide(state.as_ref()) {
            ReconcileAction::Register => "register".green(),
            ReconcileAction::Unregister => "unregister".red(),
        };
        println!("  {:<30} {:<10} {}", account.to_string(), next, note.dimmed());
    }
}

fn print_files(project: &Project) {
    println!("\n{}", "  Files".bold());

    let store = project.store();
    match store.accounts() {
        Ok(stored) => output::success(&format!(
            "Store: {} ({} account(s) with records)",
            store.path().display(),
            stored.len()
        )),
        Err(e) => output::warning(&format!("Store unreadable: {e}")),
    }

    match project.event_log() {
        Some(log) if log.path().exists() => {
            output::success(&format!("Event log: {}", log.path().display()))
        }
        Some(log) => println!("  Event log: {} (no events yet)", log.path().display()),
        None => println!("  Event log: {}", "disabled".dimmed()),
    }
}
