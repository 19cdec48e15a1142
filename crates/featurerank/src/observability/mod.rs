//! Tracing setup: `fmt` subscriber with an `EnvFilter` and span macros.

pub mod spans;

use std::sync::Once;

use featurerank_core::config::ObservabilityConfig;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub use spans::names;

static INIT: Once = Once::new();

/// Install the global subscriber.
///
/// `RUST_LOG` wins over `config.log_level`. Returns `true` only for the call
/// that installed the subscriber; later calls (or a subscriber installed by
/// someone else) return `false`.
pub fn init_tracing(config: &ObservabilityConfig) -> bool {
    let mut installed = false;
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

        let registry = tracing_subscriber::registry().with(filter);
        installed = if config.json_logs {
            registry
                .with(fmt::layer().json().with_target(true).with_thread_ids(true))
                .try_init()
                .is_ok()
        } else {
            registry
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_thread_ids(true)
                        .with_file(true)
                        .with_line_number(true),
                )
                .try_init()
                .is_ok()
        };
    });
    installed
}
