//! Structured logging bootstrap.
//!
//! # Design Decisions
//! - Uses the tracing crate for structured logging
//! - Filter configurable via `RUST_LOG`, with a sane library default
//! - Safe to call more than once (later calls are no-ops), so embedding
//!   applications and tests can both use it

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install a global tracing subscriber.
///
/// Embedding applications that bring their own subscriber can skip this.
pub fn init() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mice_session=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
