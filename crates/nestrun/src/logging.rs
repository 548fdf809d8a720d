use tracing_subscriber::EnvFilter;

/// Log filter directive, `warn` when unset.
pub const LOG_VAR: &str = "NESTRUN_LOG";

/// Install the stderr subscriber. A no-op when one is already installed.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
