pub mod configuration_store;
pub mod event_log;
pub mod key_provider;
pub mod message_sink;
pub mod observer;
pub mod registration_client;
