use std::path::PathBuf;

/// All domain errors for pushguard.
///
/// Each variant provides enough context to diagnose the issue
/// without needing a debugger.
#[derive(Debug, thiserror::Error)]
pub enum PushGuardError {
    #[error(
        "File not found: {path}\n\n  \
         Check that the path is correct and the file exists.\n  \
         Run 'pushguard status' to see the configured files."
    )]
    FileNotFound { path: PathBuf },

    #[error(
        "pushguard is not initialized in this directory\n\n  \
         Run 'pushguard init' first, or point --config at an existing .pushguard/ directory."
    )]
    NotInitialized,

    #[error("Invalid configuration: {detail}")]
    InvalidConfig { detail: String },

    #[error(
        "Invalid account id '{id}'\n\n  \
         Account ids must be non-empty and contain no whitespace, '/' or '\\'.\n  \
         Check the accounts list in .pushguard/config.toml."
    )]
    InvalidAccountId { id: String },

    #[error("Configuration store error: {detail}")]
    StoreError { detail: String },

    #[error("Malformed push record for account '{account}': {detail}")]
    MalformedRecord { account: String, detail: String },

    #[error(
        "Invalid verification key: {reason}\n\n  \
         Expected a single line of the form <scheme>:<base64>.\n  \
         Supported schemes: ed25519, p256"
    )]
    InvalidKey { reason: String },

    #[error(
        "Relay call failed for account '{account}': {reason}\n\n  \
         This is not fatal. The account keeps its current state until the next\n  \
         'pushguard reconcile' pass."
    )]
    TransportFailed { account: String, reason: String },

    #[error(
        "Signature rejected: {verdict}\n\n  \
         The payload was not accepted.\n  \
         Run 'pushguard status' to check which verification key is installed."
    )]
    SignatureRejected { verdict: String },

    #[error("Event log error: {detail}")]
    EventLogError { detail: String },

    #[error("Inbox error: {detail}")]
    InboxError { detail: String },

    #[error(
        "This project uses format version {project_version}, but your pushguard \
         only supports up to version {supported_version}.\n\n  \
         Solution: install a newer pushguard release."
    )]
    FormatVersionTooNew {
        project_version: u32,
        supported_version: u32,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PushGuardError>;
