use crate::cli::commands::project::Project;
use crate::cli::commands::verify::{read_input, report_verdict, snapshot_key};
use crate::cli::output;
use crate::core::errors::Result;
use crate::core::models::account::AccountId;
use crate::core::services::inbound_gate::InboundGate;

/// Execute the `pushguard receive` command.
///
/// Verifies an inbound payload and, only if its signature is valid,
/// spools it to the inbox.
pub fn execute(account: &str, subject: &str, signature: &str) -> Result<()> {
    let project = Project::open()?;
    let account = AccountId::parse(account)?;

    let subject_bytes = read_input(subject)?;
    let signature_bytes = read_input(signature)?;

    let key = snapshot_key(&project.key_provider()?);
    let inbox = project.inbox();
    let gate = InboundGate {
        keys: &key,
        sink: &inbox,
    };

    output::header("pushguard receive");

    let verdict = gate.receive(&account, &subject_bytes, &signature_bytes)?;
    report_verdict(verdict, key.as_ref())?;
    output::success(&format!("Payload for {account} spooled to {}", inbox.inbox().display()));

    Ok(())
}
