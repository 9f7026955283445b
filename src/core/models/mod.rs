pub mod account;
pub mod push_configuration;
pub mod registration;
pub mod registration_event;
pub mod verification;
pub mod verification_key;
