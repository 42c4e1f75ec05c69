//! Tracing subscriber setup for hosts that do not install their own.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install a fmt subscriber filtered by `RUST_LOG`, falling back to
/// `default_directive` (for example `"graft=info"`).
///
/// Returns `false` when a global subscriber was already installed, in which
/// case nothing changes.
///
/// # Example
/// ```ignore
/// graft::logging::init_tracing("graft=debug");
/// ```
pub fn init_tracing(default_directive: &str) -> bool {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_directive.into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok()
}
