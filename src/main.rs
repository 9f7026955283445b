mod adapters;
mod cli;
mod config;
mod core;

use clap::Parser;

use cli::{Cli, Commands};
use config::app_config::AppConfig;

fn main() {
    let args = Cli::parse();

    cli::context::init(args.config.as_deref());

    // The config may not exist yet (init) or be broken; the command itself
    // reports that, logging just falls back to the default level.
    let config = AppConfig::load(cli::context::pushguard_dir()).ok();
    cli::logging::init(
        args.verbose,
        args.quiet,
        config.as_ref().and_then(|c| c.log_level()),
    );

    let result = match &args.command {
        Commands::Init => cli::commands::init::execute(args.verbose),
        Commands::Reconcile { dry_run } => cli::commands::reconcile::execute(*dry_run),
        Commands::Verify { subject, signature } => {
            cli::commands::verify::execute(subject, signature)
        }
        Commands::Receive {
            account,
            subject,
            signature,
        } => cli::commands::receive::execute(account, subject, signature),
        Commands::Endpoint { action } => cli::commands::endpoint::execute(action),
        Commands::Forget { account } => cli::commands::forget::execute(account),
        Commands::Status => cli::commands::status::execute(),
        Commands::History {
            account,
            since,
            last,
        } => cli::commands::history::execute(account.as_deref(), since.as_deref(), *last),
    };

    if let Err(e) = result {
        cli::output::error(&format!("Error: {e}"));
        std::process::exit(1);
    }
}
