//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

use super::LogConfig;

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured filter. Call once at process start;
/// subsequent calls are ignored.
pub fn init_tracing(config: &LogConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.filter.clone()));

    if config.json {
        let _ = tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .try_init();
    } else {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .try_init();
    }
}
