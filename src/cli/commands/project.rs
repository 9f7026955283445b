use std::path::{Path, PathBuf};

use crate::adapters::events::json_event_log::JsonEventLog;
use crate::adapters::inbox::spool_sink::SpoolSink;
use crate::adapters::keys::file_key_provider::FileKeyProvider;
use crate::adapters::relay::dry_run_client::DryRunClient;
use crate::adapters::relay::http_registration_client::HttpRegistrationClient;
use crate::adapters::stores::file_configuration_store::FileConfigurationStore;
use crate::cli::context;
use crate::config::app_config::AppConfig;
use crate::core::errors::{PushGuardError, Result};
use crate::core::traits::registration_client::PushRegistrationClient;

/// The relay client chosen for one run.
pub struct Relay {
    pub client: Box<dyn PushRegistrationClient>,
    /// `true` when nothing is sent to a relay.
    pub dry_run: bool,
}

impl Relay {
    fn dry() -> Self {
        Self {
            client: Box::new(DryRunClient),
            dry_run: true,
        }
    }
}

/// An initialized pushguard directory with its loaded configuration.
///
/// Builds the concrete adapters every command wires into the services.
pub struct Project {
    dir: PathBuf,
    pub config: AppConfig,
}

impl Project {
    /// Open the directory selected by `--config` (default `.pushguard`).
    pub fn open() -> Result<Self> {
        let dir = context::pushguard_dir();
        if !dir.exists() {
            return Err(PushGuardError::NotInitialized);
        }
        let config = AppConfig::load(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
            config,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn store(&self) -> FileConfigurationStore {
        FileConfigurationStore::new(self.config.store_path(&self.dir))
    }

    pub fn key_provider(&self) -> Result<FileKeyProvider> {
        Ok(FileKeyProvider::new(self.config.key_path(&self.dir)?))
    }

    pub fn inbox(&self) -> SpoolSink {
        SpoolSink::new(self.dir.join("inbox"))
    }

    /// The event log, or `None` when `[events] enabled = false`.
    pub fn event_log(&self) -> Option<JsonEventLog> {
        self.config
            .events_enabled()
            .then(|| JsonEventLog::new(&self.dir, self.config.event_log_file()))
    }

    /// The relay client for this run. Falls back to a dry run when no
    /// `[relay]` is configured.
    pub fn relay_client(&self, dry_run: bool) -> Result<Relay> {
        match &self.config.relay {
            Some(relay) if !dry_run => {
                let client = HttpRegistrationClient::new(&relay.url, relay.timeout())?;
                tracing::debug!(url = client.base_url(), "using HTTP relay");
                Ok(Relay {
                    client: Box::new(client),
                    dry_run: false,
                })
            }
            Some(_) => Ok(Relay::dry()),
            None => {
                tracing::debug!("no relay configured, running dry");
                Ok(Relay::dry())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "[pushguard]\nversion = \"0.3.0\"\n";

    fn project(config: &str) -> Project {
        Project {
            dir: PathBuf::from(".pushguard"),
            config: AppConfig::parse(config).unwrap(),
        }
    }

    #[test]
    fn no_relay_runs_dry() {
        let relay = project(BASE).relay_client(false).unwrap();
        assert!(relay.dry_run);
    }

    #[test]
    fn configured_relay_is_live_unless_dry_run_requested() {
        let project = project(&format!("{BASE}\n[relay]\nurl = \"https://relay.example\"\n"));

        let live = project.relay_client(false).unwrap();
        assert!(!live.dry_run);
        assert_eq!(live.client.name(), "http");

        assert!(project.relay_client(true).unwrap().dry_run);
    }
}
