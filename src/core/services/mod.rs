pub mod endpoint_lifecycle;
pub mod inbound_gate;
pub mod reconciliation;
pub mod signature_verifier;
