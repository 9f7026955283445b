use crate::core::errors::Result;
use crate::core::models::account::AccountId;
use crate::core::models::verification::SignatureVerification;
use crate::core::services::signature_verifier::SignatureVerifier;
use crate::core::traits::key_provider::KeyProvider;
use crate::core::traits::message_sink::MessageSink;

/// Entry point for inbound push payloads: nothing reaches the sink
/// unless its signature checks out.
pub struct InboundGate<'a, K: KeyProvider + ?Sized, M: MessageSink + ?Sized> {
    pub keys: &'a K,
    pub sink: &'a M,
}

impl<K: KeyProvider + ?Sized, M: MessageSink + ?Sized> InboundGate<'_, K, M> {
    /// Verify and, on a `Valid` verdict only, deliver `subject` to the sink.
    pub fn receive(
        &self,
        account: &AccountId,
        subject: &[u8],
        signature: &[u8],
    ) -> Result<SignatureVerification> {
        let verdict = SignatureVerifier.verify_with(self.keys, subject, signature);

        if verdict.is_trusted() {
            self.sink.deliver(account, subject)?;
            tracing::info!(account = %account, bytes = subject.len(), "push payload accepted");
        } else {
            tracing::warn!(account = %account, %verdict, "push payload rejected");
        }

        Ok(verdict)
    }
}
