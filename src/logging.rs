//! Tracing subscriber setup for the CLI

use crate::config::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// Build the filter: `RUST_LOG` wins, then `--verbose`, then the configured level.
#[must_use]
pub fn env_filter(config: &LoggingConfig, verbose: bool) -> EnvFilter {
    let level = if verbose { "debug" } else { config.level.as_str() };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Install the global subscriber. Logs go to stderr so stdout stays clean for records.
pub fn init(config: &LoggingConfig, verbose: bool) {
    let filter = env_filter(config, verbose);
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let result = if config.format == "json" {
        builder.json().try_init()
    } else {
        builder.pretty().try_init()
    };

    if let Err(e) = result {
        eprintln!("Logging already initialized: {e}");
    }
}
