//! Tracing setup: structured logging with span definitions and event types.

pub mod events;
pub mod spans;

use kingdom_core::config::ObservabilityConfig;
use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the configured log level.
pub const LOG_ENV_VAR: &str = "KINGDOM_LOG";

/// Install the global subscriber described by `config`.
///
/// `KINGDOM_LOG` wins over `config.log_level` when set. Returns `false` when
/// tracing is disabled or a global subscriber is already installed, so tests
/// and embedding hosts can call this more than once.
pub fn init_tracing(config: &ObservabilityConfig) -> bool {
    if !config.tracing_enabled {
        return false;
    }
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if config.json_logs {
        builder
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .json()
            .try_init()
            .is_ok()
    } else {
        builder.compact().try_init().is_ok()
    }
}

/// Initialize tracing with a custom filter string (for testing or embedding).
pub fn init_tracing_with_filter(filter: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(true)
        .with_test_writer()
        .try_init()
        .is_ok()
}
