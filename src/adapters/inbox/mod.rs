pub mod spool_sink;
