use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber. Filters come from `RUST_LOG`, defaulting
/// to "info". Logs go to stderr so JSON on stdout stays parseable.
pub fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("logging initialised");
}
