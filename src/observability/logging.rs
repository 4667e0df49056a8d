//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the logging subsystem
//! - Honor `RUST_LOG` over the configured default level

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber. The environment filter wins over
/// `default_level` when `RUST_LOG` is set. Call once at startup.
pub fn init_logging(default_level: &str) {
    let default_filter = format!("split_route={0},tower_http={0}", default_level);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&default_filter)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
