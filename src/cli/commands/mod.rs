pub mod endpoint;
pub mod event_helpers;
pub mod forget;
pub mod history;
pub mod init;
pub mod project;
pub mod receive;
pub mod reconcile;
pub mod status;
pub mod verify;
