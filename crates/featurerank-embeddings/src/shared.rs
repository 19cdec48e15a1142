//! Process-wide embedding engine.
//!
//! The engine (and whatever model it loads) is created once, on first
//! acquisition, and lives until the process exits. All pipeline code that
//! wants the shared model goes through [`shared_engine`]; tests substitute a
//! stub by calling [`install_shared_engine`] before anything else acquires it.

use std::sync::{Arc, OnceLock};

use featurerank_core::config::EmbeddingConfig;
use tracing::warn;

use crate::engine::EmbeddingEngine;

static SHARED: OnceLock<Arc<EmbeddingEngine>> = OnceLock::new();

/// Acquire the shared engine, creating it from `config` on first use.
///
/// Later calls return the existing engine; a differing `config` is ignored.
pub fn shared_engine(config: &EmbeddingConfig) -> Arc<EmbeddingEngine> {
    let engine = SHARED.get_or_init(|| Arc::new(EmbeddingEngine::new(config.clone())));
    warn_on_config_drift(engine.config(), config);
    Arc::clone(engine)
}

/// Warn when a caller asks for a config the shared engine was not built
/// with. Returns whether the two differ.
fn warn_on_config_drift(active: &EmbeddingConfig, requested: &EmbeddingConfig) -> bool {
    if active == requested {
        return false;
    }
    warn!(
        active_provider = %active.provider,
        requested_provider = %requested.provider,
        active_dims = active.dimensions,
        requested_dims = requested.dimensions,
        "shared embedding engine already initialized with a different config, ignoring the requested one"
    );
    true
}

/// Install `engine` as the shared engine.
///
/// # Errors
/// Hands the engine back if the shared engine was already initialized.
pub fn install_shared_engine(engine: EmbeddingEngine) -> Result<(), Arc<EmbeddingEngine>> {
    SHARED.set(Arc::new(engine))
}

/// Whether the shared engine has been created.
pub fn is_initialized() -> bool {
    SHARED.get().is_some()
}
