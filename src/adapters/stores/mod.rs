pub mod file_configuration_store;
