//! In-memory collaborators shared by the service unit tests.

use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::core::errors::{PushGuardError, Result};
use crate::core::models::account::AccountId;
use crate::core::models::push_configuration::PUSH_RECORD_KEY;
use crate::core::models::registration::RegistrationOutcome;
use crate::core::models::verification_key::VerificationKey;
use crate::core::traits::configuration_store::ConfigurationStore;
use crate::core::traits::key_provider::KeyProvider;
use crate::core::traits::message_sink::MessageSink;
use crate::core::traits::observer::RegistrationObserver;
use crate::core::traits::registration_client::PushRegistrationClient;

type Entries = BTreeMap<(String, String), Vec<u8>>;

#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<Entries>,
    failing: bool,
}

impl MemoryStore {
    pub fn with_record(account: &str, raw: &[u8]) -> Self {
        let store = Self::default();
        store
            .entries
            .lock()
            .unwrap()
            .insert((account.to_string(), PUSH_RECORD_KEY.to_string()), raw.to_vec());
        store
    }

    /// A store whose every operation errors.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn snapshot(&self) -> Entries {
        self.entries.lock().unwrap().clone()
    }

    fn check(&self) -> Result<()> {
        if self.failing {
            return Err(PushGuardError::StoreError {
                detail: "store offline".into(),
            });
        }
        Ok(())
    }
}

impl ConfigurationStore for MemoryStore {
    fn get(&self, account: &AccountId, key: &str) -> Result<Option<Vec<u8>>> {
        self.check()?;
        let entries = self.entries.lock().unwrap();
        Ok(entries
            .get(&(account.to_string(), key.to_string()))
            .cloned())
    }

    fn put(&self, account: &AccountId, key: &str, value: &[u8]) -> Result<()> {
        self.check()?;
        self.entries
            .lock()
            .unwrap()
            .insert((account.to_string(), key.to_string()), value.to_vec());
        Ok(())
    }

    fn delete(&self, account: &AccountId, key: &str) -> Result<()> {
        self.check()?;
        self.entries
            .lock()
            .unwrap()
            .remove(&(account.to_string(), key.to_string()));
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Register(String),
    Unregister(String),
}

#[derive(Default)]
pub struct RecordingClient {
    calls: Mutex<Vec<Call>>,
    fail_for: Option<String>,
}

impl RecordingClient {
    /// A client that records every call but rejects those for `account`.
    pub fn failing_for(account: &str) -> Self {
        Self {
            fail_for: Some(account.to_string()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call, account: &AccountId) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        if self.fail_for.as_deref() == Some(account.as_str()) {
            return Err(PushGuardError::TransportFailed {
                account: account.to_string(),
                reason: "relay unreachable".into(),
            });
        }
        Ok(())
    }
}

impl PushRegistrationClient for RecordingClient {
    fn register(&self, account: &AccountId) -> Result<()> {
        self.record(Call::Register(account.to_string()), account)
    }

    fn unregister(&self, account: &AccountId) -> Result<()> {
        self.record(Call::Unregister(account.to_string()), account)
    }

    fn name(&self) -> &str {
        "recording"
    }
}

#[derive(Default)]
pub struct RecordingObserver {
    seen: Mutex<Vec<RegistrationOutcome>>,
}

impl RecordingObserver {
    pub fn outcomes(&self) -> Vec<RegistrationOutcome> {
        self.seen.lock().unwrap().clone()
    }
}

impl RegistrationObserver for RecordingObserver {
    fn on_result(&self, outcome: &RegistrationOutcome) {
        self.seen.lock().unwrap().push(outcome.clone());
    }
}

/// Key provider returning a fixed answer.
pub enum StaticKeyProvider {
    Key(VerificationKey),
    Empty,
    Broken,
}

impl KeyProvider for StaticKeyProvider {
    fn current_verification_key(&self) -> Result<Option<VerificationKey>> {
        match self {
            Self::Key(key) => Ok(Some(key.clone())),
            Self::Empty => Ok(None),
            Self::Broken => Err(PushGuardError::InvalidKey {
                reason: "key file unreadable".into(),
            }),
        }
    }
}

#[derive(Default)]
pub struct RecordingSink {
    delivered: Mutex<Vec<(String, Vec<u8>)>>,
}

impl RecordingSink {
    pub fn delivered(&self) -> Vec<(String, Vec<u8>)> {
        self.delivered.lock().unwrap().clone()
    }
}

impl MessageSink for RecordingSink {
    fn deliver(&self, account: &AccountId, payload: &[u8]) -> Result<()> {
        self.delivered
            .lock()
            .unwrap()
            .push((account.to_string(), payload.to_vec()));
        Ok(())
    }
}
