//! Diagnostic tracing for the `apple-crosstool` binary.
//!
//! The library only emits `tracing` events; installing a subscriber is left
//! to the binary (or to the embedding build tool).

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber.
///
/// Reads `RUST_LOG`, defaulting to `warn`. Output goes to stderr so that
/// stdout stays machine-readable.
///
/// ```bash
/// RUST_LOG=apple_crosstool=debug apple-crosstool transition
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
