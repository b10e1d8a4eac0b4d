use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,sji_api_client=info,sji_core=info";

/// Log to stderr; stdout carries command output only.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}
