use crate::cli::context;
use crate::cli::output;
use crate::config::app_config::{AppConfig, CONFIG_FILE};
use crate::core::errors::{PushGuardError, Result};

const KEY_FILE_TEMPLATE: &str = "\
# Relay verification key, one line: <scheme>:<base64>
# Supported schemes: ed25519, p256
";

/// Execute the `pushguard init` command.
///
/// Creates the pushguard directory with a default `config.toml`, an empty
/// store and a placeholder key file.
pub fn execute(verbose: bool) -> Result<()> {
    let dir = context::pushguard_dir();

    if dir.exists() {
        return Err(PushGuardError::InvalidConfig {
            detail: format!("pushguard is already initialized here ({} exists)", dir.display()),
        });
    }

    output::header("pushguard: initializing");

    std::fs::create_dir_all(dir)?;
    output::success(&format!("Created {}/", dir.display()));

    std::fs::write(dir.join(CONFIG_FILE), AppConfig::default_toml())?;
    output::success("Generated config.toml with defaults");

    std::fs::write(dir.join("store.json"), "{}\n")?;
    output::success("Created empty store.json");

    std::fs::write(dir.join("verification.key"), KEY_FILE_TEMPLATE)?;
    output::success("Created verification.key placeholder");

    tracing::info!(dir = %dir.display(), "pushguard initialized");

    output::success("Ready.\n");
    print_next_steps(verbose);

    Ok(())
}

fn print_next_steps(verbose: bool) {
    println!("  Next steps:");
    println!("    1. Add your accounts to the accounts list in config.toml");
    println!("    2. Paste the relay verification key into verification.key");
    println!("    3. Run 'pushguard reconcile --dry-run' to preview the relay calls");

    if verbose {
        println!();
        println!("  Configure [relay] url in config.toml to talk to a real relay.");
        println!("  Without it, 'pushguard reconcile' only reports what it would do.");
    }
}
