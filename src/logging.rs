//! Logging setup shared by both binaries

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,college_api=debug";

/// Install the global fmt subscriber. `RUST_LOG` overrides the default filter.
pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()),
        )
        .init();
}
