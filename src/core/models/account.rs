use std::sync::LazyLock;

use regex::Regex;

use crate::core::errors::{PushGuardError, Result};

static ACCOUNT_ID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s/\\]+$").expect("account id pattern is a valid regex")
});

/// A locally configured user identity whose push subscription is
/// tracked independently of every other account.
///
/// The core treats the id as opaque. It is only validated when it comes
/// from user-editable input (config file, command line).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountId(String);

impl AccountId {
    /// Build an id without validation.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Build an id from user input, rejecting empty ids and ids that
    /// contain whitespace or path separators.
    pub fn parse(id: &str) -> Result<Self> {
        if !ACCOUNT_ID_PATTERN.is_match(id) {
            return Err(PushGuardError::InvalidAccountId { id: id.to_string() });
        }
        Ok(Self(id.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
