//! Diagnostic logging setup.
//!
//! Library code emits `tracing` events; only the binary installs a
//! subscriber. Events go to stderr so stdout carries nothing but command
//! output (rendered HTML, listings).

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "warn";

/// Install the global subscriber. `verbose` raises the default to `debug`.
///
/// Calling this twice is harmless; the second call is ignored.
pub fn init(verbose: bool) {
    let fallback = if verbose { "frames_of_life=debug" } else { DEFAULT_FILTER };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
