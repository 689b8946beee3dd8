//! Tracing subscriber setup for the service binary.

use tracing_subscriber::EnvFilter;

/// Default directive when neither a flag nor `RUST_LOG` is given.
pub const DEFAULT_FILTER: &str = "info";

/// Resolve the filter: explicit directive, then `RUST_LOG`, then `info`.
pub fn env_filter(directive: Option<&str>) -> EnvFilter {
    match directive {
        Some(directive) => EnvFilter::try_new(directive).unwrap_or_else(|e| {
            eprintln!("invalid log filter {directive:?} ({e}), using {DEFAULT_FILTER}");
            EnvFilter::new(DEFAULT_FILTER)
        }),
        None => {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
        }
    }
}

/// Install the global fmt subscriber. Later calls are ignored.
pub fn init(directive: Option<&str>) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(directive))
        .with_target(true)
        .try_init();
}
