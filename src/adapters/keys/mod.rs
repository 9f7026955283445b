pub mod file_key_provider;
