use dns_check_domain::ProbeConfig;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Logs go to stderr; stdout is reserved for the exposition.
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_logging(config: &ProbeConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_level(true);

    if config.logging.is_json() {
        builder.json().init();
    } else {
        builder.with_ansi(false).init();
    }

    debug!(
        level = %config.logging.level,
        format = %config.logging.format,
        "Logging initialized"
    );
}
