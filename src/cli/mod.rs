pub mod commands;
pub mod context;
pub mod logging;
pub mod output;

use clap::{Parser, Subcommand};

/// Keep push subscriptions in line with your accounts. Trust only signed payloads.
#[derive(Parser, Debug)]
#[command(name = "pushguard", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode: only show errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to an alternative pushguard directory (default: .pushguard)
    #[arg(long, global = true, env = "PUSHGUARD_DIR")]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize pushguard in the current directory
    Init,

    /// Register or unregister every configured account with the relay
    Reconcile {
        /// Decide and report without contacting the relay
        #[arg(long)]
        dry_run: bool,
    },

    /// Check a detached signature against the verification key
    Verify {
        /// File holding the signed bytes
        #[arg(long)]
        subject: String,
        /// File holding the raw signature bytes
        #[arg(long)]
        signature: String,
    },

    /// Verify an inbound push payload and spool it to the inbox
    Receive {
        /// Account the payload is addressed to
        account: String,
        /// File holding the payload
        #[arg(long)]
        subject: String,
        /// File holding the raw signature bytes
        #[arg(long)]
        signature: String,
    },

    /// Report a push distributor event for an account
    Endpoint {
        #[command(subcommand)]
        action: EndpointAction,
    },

    /// Mark an account so the next reconcile unsubscribes it
    Forget {
        /// Account to unsubscribe
        account: String,
    },

    /// Show configured accounts, their desired state and the key status
    Status,

    /// Show registration history
    History {
        /// Filter by account
        #[arg(long)]
        account: Option<String>,
        /// Filter entries since this date (ISO 8601)
        #[arg(long)]
        since: Option<String>,
        /// Show last N entries
        #[arg(long)]
        last: Option<usize>,
    },
}

#[derive(Subcommand, Debug)]
pub enum EndpointAction {
    /// The distributor issued a new endpoint
    New {
        account: String,
        /// Endpoint URL handed out by the distributor
        endpoint: String,
    },
    /// Registration with the distributor failed
    Failed { account: String },
    /// The distributor unregistered the account
    Unregistered { account: String },
}
