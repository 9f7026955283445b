use std::path::{Path, PathBuf};

use crate::core::errors::{PushGuardError, Result};
use crate::core::models::account::AccountId;
use crate::core::traits::message_sink::MessageSink;

/// Message sink that drops each trusted payload into an inbox directory
/// as `<account>-<timestamp>.msg`, for the notification worker to pick up.
pub struct SpoolSink {
    inbox: PathBuf,
}

impl SpoolSink {
    pub fn new(inbox: PathBuf) -> Self {
        Self { inbox }
    }

    pub fn inbox(&self) -> &Path {
        &self.inbox
    }

    fn file_name(account: &AccountId) -> String {
        let stamp = chrono::Utc::now().format("%Y%m%dT%H%M%S%.6fZ");
        format!("{account}-{stamp}.msg")
    }
}

impl MessageSink for SpoolSink {
    fn deliver(&self, account: &AccountId, payload: &[u8]) -> Result<()> {
        std::fs::create_dir_all(&self.inbox).map_err(|e| PushGuardError::InboxError {
            detail: format!("Cannot create {}: {e}", self.inbox.display()),
        })?;

        let path = self.inbox.join(Self::file_name(account));
        std::fs::write(&path, payload).map_err(|e| PushGuardError::InboxError {
            detail: format!("Cannot write {}: {e}", path.display()),
        })?;

        tracing::debug!(account = %account, path = %path.display(), "payload spooled");
        Ok(())
    }
}
