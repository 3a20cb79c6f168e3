//! Utility functions for the digit pad.

/// Initializes the tracing subscriber for logging.
///
/// Installs an environment filter (configured through `RUST_LOG`) and a
/// formatting layer. Only binaries should call this; the library itself just
/// emits events.
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
