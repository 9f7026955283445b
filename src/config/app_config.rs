use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::adapters::keys::file_key_provider::FileKeyProvider;
use crate::adapters::relay::http_registration_client::DEFAULT_TIMEOUT;
use crate::core::errors::{PushGuardError, Result};
use crate::core::models::account::AccountId;

/// Current format version supported by this build of pushguard.
pub const CURRENT_FORMAT_VERSION: u32 = 1;

/// Name of the configuration file inside the pushguard directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Top-level configuration read from `.pushguard/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Locally configured accounts, in reconciliation order.
    #[serde(default)]
    pub accounts: Vec<String>,
    pub pushguard: PushGuardSection,
    pub relay: Option<RelaySection>,
    pub keys: Option<KeysSection>,
    pub events: Option<EventsSection>,
    pub logging: Option<LoggingSection>,
}

impl AppConfig {
    /// Load the configuration from `{dir}/config.toml`.
    ///
    /// Account ids and file names are validated after parsing so that a
    /// hand-edited config cannot point the store or event log outside
    /// the pushguard directory.
    pub fn load(dir: &Path) -> Result<Self> {
        let config_path = dir.join(CONFIG_FILE);
        if !config_path.exists() {
            return Err(PushGuardError::NotInitialized);
        }
        let content = std::fs::read_to_string(&config_path)?;
        Self::parse(&content)
    }

    /// Parse and validate configuration text.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| PushGuardError::InvalidConfig {
            detail: format!("Failed to parse config.toml: {e}"),
        })?;

        if config.pushguard.format_version > CURRENT_FORMAT_VERSION {
            return Err(PushGuardError::FormatVersionTooNew {
                project_version: config.pushguard.format_version,
                supported_version: CURRENT_FORMAT_VERSION,
            });
        }

        for account in &config.accounts {
            AccountId::parse(account)?;
        }

        validate_simple_filename(&config.pushguard.store_file, "store file")?;
        if let Some(events) = &config.events {
            validate_simple_filename(&events.log_file, "event log file")?;
        }

        if let Some(relay) = &config.relay
            && !(relay.url.starts_with("https://") || relay.url.starts_with("http://"))
        {
            return Err(PushGuardError::InvalidConfig {
                detail: format!("relay url must start with http:// or https://, got '{}'", relay.url),
            });
        }

        Ok(config)
    }

    /// Configured accounts in order. Validated by [`AppConfig::parse`].
    pub fn account_ids(&self) -> Vec<AccountId> {
        self.accounts.iter().map(|a| AccountId::new(a.as_str())).collect()
    }

    pub fn store_path(&self, dir: &Path) -> PathBuf {
        dir.join(&self.pushguard.store_file)
    }

    /// Verification key location. Relative paths are resolved against
    /// the pushguard directory; without a `[keys]` section the per-user
    /// default is used.
    pub fn key_path(&self, dir: &Path) -> Result<PathBuf> {
        match self.keys.as_ref().and_then(|k| k.file.as_deref()) {
            Some(file) => {
                let path = PathBuf::from(file);
                Ok(if path.is_absolute() { path } else { dir.join(path) })
            }
            None => FileKeyProvider::default_key_path(),
        }
    }

    /// Event logging is on unless explicitly disabled.
    pub fn events_enabled(&self) -> bool {
        self.events.as_ref().map(|e| e.enabled).unwrap_or(true)
    }

    pub fn event_log_file(&self) -> &str {
        self.events
            .as_ref()
            .map(|e| e.log_file.as_str())
            .unwrap_or(DEFAULT_EVENT_LOG)
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().map(|l| l.level.as_str())
    }

    /// Default configuration written by `pushguard init`.
    pub fn default_toml() -> String {
        format!(
            r#"# Accounts to keep subscribed, in reconciliation order.
accounts = []

[pushguard]
version = "{version}"
format_version = {CURRENT_FORMAT_VERSION}
store_file = "store.json"

# Uncomment to talk to a real relay. Without it, reconcile runs dry.
# [relay]
# url = "https://push.example.org"
# timeout_secs = 10

[keys]
file = "verification.key"

[events]
enabled = true
log_file = "{DEFAULT_EVENT_LOG}"

[logging]
level = "info"
"#,
            version = env!("CARGO_PKG_VERSION"),
        )
    }
}

const DEFAULT_EVENT_LOG: &str = "events.log";

/// The `[pushguard]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct PushGuardSection {
    pub version: String,
    /// Format version for backward compatibility. Defaults to 1 if missing.
    #[serde(default = "default_format_version")]
    pub format_version: u32,
    #[serde(default = "default_store_file")]
    pub store_file: String,
}

fn default_format_version() -> u32 {
    1
}

fn default_store_file() -> String {
    "store.json".to_string()
}

/// The `[relay]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct RelaySection {
    pub url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl RelaySection {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

/// The `[keys]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct KeysSection {
    pub file: Option<String>,
}

/// The `[events]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct EventsSection {
    pub enabled: bool,
    pub log_file: String,
}

/// The `[logging]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSection {
    pub level: String,
}

/// Reject anything that is not a bare file name.
fn validate_simple_filename(name: &str, what: &str) -> Result<()> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains('\\');
    if invalid {
        return Err(PushGuardError::InvalidConfig {
            detail: format!("{what} must be a plain file name, got '{name}'"),
        });
    }
    Ok(())
}
