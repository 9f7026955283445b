pub mod dry_run_client;
pub mod http_registration_client;
