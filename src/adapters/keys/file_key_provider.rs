use std::path::{Path, PathBuf};

use crate::core::errors::{PushGuardError, Result};
use crate::core::models::verification_key::VerificationKey;
use crate::core::traits::key_provider::KeyProvider;

/// Key provider that reads the verification key from a text file.
///
/// Format: one `<scheme>:<base64>` line. Blank lines and lines starting
/// with `#` are ignored. A missing or empty file means no key has been
/// provisioned yet.
///
/// Example `verification.key`:
/// ```text
/// # Relay signing key, rotated 2026-03-01
/// ed25519:11qYAYKxCrfVS/7TyWQHOg7hcvPapiMlrwIaaPcHURo=
/// ```
///
/// The file is re-read on every call, so replacing it takes effect on
/// the next payload.
#[derive(Clone)]
pub struct FileKeyProvider {
    path: PathBuf,
}

impl FileKeyProvider {
    /// Create a provider backed by the given file path.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Default key location when the config does not name one:
    /// `~/.config/pushguard/verification.key`.
    pub fn default_key_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| PushGuardError::InvalidConfig {
            detail: "Could not determine config directory".into(),
        })?;
        Ok(config_dir.join("pushguard").join("verification.key"))
    }

    /// Return the file path this provider reads from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The first line that carries key material, if any.
    fn key_line(content: &str) -> Option<&str> {
        content
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty() && !line.starts_with('#'))
    }
}

impl KeyProvider for FileKeyProvider {
    fn current_verification_key(&self) -> Result<Option<VerificationKey>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => PushGuardError::FileNotFound {
                path: self.path.clone(),
            },
            std::io::ErrorKind::InvalidData => PushGuardError::InvalidKey {
                reason: format!("{} is not valid UTF-8 text", self.path.display()),
            },
            _ => PushGuardError::Io(e),
        })?;

        Self::key_line(&content).map(VerificationKey::parse).transpose()
    }
}
