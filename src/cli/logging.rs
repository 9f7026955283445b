use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber, writing to stderr.
///
/// `RUST_LOG` wins when set. Otherwise `--quiet` means errors only,
/// `--verbose` means debug, and the `[logging] level` from config (or
/// `info`) applies to pushguard itself. Dependencies stay at `warn`.
pub fn init(verbose: bool, quiet: bool, config_level: Option<&str>) {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        config_level.unwrap_or("info")
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("warn,pushguard={level}")))
        .unwrap_or_else(|_| EnvFilter::new("warn,pushguard=info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
