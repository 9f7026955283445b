use serde::{Deserialize, Serialize};

use crate::core::errors::{PushGuardError, Result};

/// Store key under which each account's push record lives.
pub const PUSH_RECORD_KEY: &str = "push";

/// Per-account push record as persisted by the configuration store.
///
/// Field names are camelCase on disk. Unknown fields are ignored so that
/// records written by newer clients still decode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushConfigurationState {
    /// Endpoint handed out by the push distributor.
    #[serde(default)]
    pub push_token: String,
    /// Desired subscription state: `true` means the account should be
    /// unsubscribed on the next reconciliation pass.
    #[serde(default)]
    pub should_be_deleted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_identifier_signature: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_public_key: Option<String>,
}

impl PushConfigurationState {
    /// A fresh record for a newly issued endpoint.
    pub fn with_endpoint(endpoint: &str) -> Self {
        Self {
            push_token: endpoint.to_string(),
            ..Self::default()
        }
    }

    /// Decode a raw stored record.
    pub fn decode(account: &str, raw: &[u8]) -> Result<Self> {
        serde_json::from_slice(raw).map_err(|e| PushGuardError::MalformedRecord {
            account: account.to_string(),
            detail: e.to_string(),
        })
    }

    /// Encode the record for the store.
    pub fn encode(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| PushGuardError::StoreError {
            detail: format!("Failed to serialize push record: {e}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_camel_case_record() {
        let raw = br#"{"pushToken":"https://up.example/abc","shouldBeDeleted":true}"#;
        let state = PushConfigurationState::decode("alice", raw).unwrap();
        assert_eq!(state.push_token, "https://up.example/abc");
        assert!(state.should_be_deleted);
        assert!(state.device_identifier.is_none());
    }

    #[test]
    fn missing_flag_defaults_to_false() {
        let state = PushConfigurationState::decode("alice", br#"{"pushToken":"x"}"#).unwrap();
        assert!(!state.should_be_deleted);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let raw = br#"{"shouldBeDeleted":false,"serverPublicKey":"abc"}"#;
        assert!(PushConfigurationState::decode("alice", raw).is_ok());
    }

    #[test]
    fn malformed_record_is_an_error() {
        let err = PushConfigurationState::decode("bob", b"not json").unwrap_err();
        assert!(matches!(err, PushGuardError::MalformedRecord { account, .. } if account == "bob"));
    }

    #[test]
    fn wrong_flag_type_is_an_error() {
        let raw = br#"{"shouldBeDeleted":"yes"}"#;
        assert!(PushConfigurationState::decode("bob", raw).is_err());
    }

    #[test]
    fn encode_uses_camel_case_and_skips_empty_optionals() {
        let json = String::from_utf8(
            PushConfigurationState::with_endpoint("https://up.example/1")
                .encode()
                .unwrap(),
        )
        .unwrap();
        assert!(json.contains("\"pushToken\":\"https://up.example/1\""));
        assert!(json.contains("\"shouldBeDeleted\":false"));
        assert!(!json.contains("deviceIdentifier"));
    }
}
