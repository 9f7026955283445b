use std::time::Duration;

use serde::Serialize;

use crate::core::errors::{PushGuardError, Result};
use crate::core::models::account::AccountId;
use crate::core::traits::registration_client::PushRegistrationClient;

/// Default timeout for a single relay call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Serialize)]
struct RegistrationRequest<'a> {
    account: &'a str,
}

/// Relay client that posts `{"account": ...}` to `<relay>/register` and
/// `<relay>/unregister`.
///
/// The core is synchronous, so each client owns a current-thread tokio
/// runtime and blocks on every request.
pub struct HttpRegistrationClient {
    base_url: String,
    client: reqwest::Client,
    runtime: tokio::runtime::Runtime,
}

impl HttpRegistrationClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(format!("pushguard/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PushGuardError::InvalidConfig {
                detail: format!("Failed to create HTTP client: {e}"),
            })?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            runtime,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, operation: &str) -> String {
        format!("{}/{operation}", self.base_url)
    }

    fn post(&self, operation: &str, account: &AccountId, missing_is_ok: bool) -> Result<()> {
        let url = self.endpoint(operation);
        let body = RegistrationRequest {
            account: account.as_str(),
        };

        let failed = |reason: String| PushGuardError::TransportFailed {
            account: account.to_string(),
            reason,
        };

        let status = self.runtime.block_on(async {
            self.client
                .post(&url)
                .json(&body)
                .send()
                .await
                .map(|resp| resp.status())
        });

        let status = status.map_err(|e| failed(format!("request to {url} failed: {e}")))?;
        tracing::debug!(account = %account, %url, status = status.as_u16(), "relay responded");

        if status.is_success() || (missing_is_ok && status == reqwest::StatusCode::NOT_FOUND) {
            Ok(())
        } else {
            Err(failed(format!("relay answered HTTP {status}")))
        }
    }
}

impl PushRegistrationClient for HttpRegistrationClient {
    fn register(&self, account: &AccountId) -> Result<()> {
        self.post("register", account, false)
    }

    /// A relay that no longer knows the account counts as success.
    fn unregister(&self, account: &AccountId) -> Result<()> {
        self.post("unregister", account, true)
    }

    fn name(&self) -> &str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let client = HttpRegistrationClient::new("https://relay.example/push/", DEFAULT_TIMEOUT).unwrap();
        assert_eq!(client.base_url(), "https://relay.example/push");
        assert_eq!(client.endpoint("register"), "https://relay.example/push/register");
    }

    #[test]
    fn unreachable_relay_is_a_transport_error() {
        let client =
            HttpRegistrationClient::new("http://127.0.0.1:9", Duration::from_millis(500)).unwrap();

        let err = client.register(&AccountId::new("alice")).unwrap_err();
        assert!(matches!(err, PushGuardError::TransportFailed { account, .. } if account == "alice"));
    }
}
