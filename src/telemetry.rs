//! Tracing subscriber setup.
//!
//! The bridge runs inside a host process that may already have installed a
//! global subscriber. Installation therefore never fails loudly: it reports
//! whether the bridge's subscriber became the global one.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Installs the global subscriber described by `config`.
///
/// `RUST_LOG` takes precedence over `config.level`. Returns false when
/// logging is disabled or another subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> bool {
    if !config.enabled {
        return false;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let registry = tracing_subscriber::registry().with(filter);

    let installed = if config.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .try_init()
            .is_ok()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(false))
            .try_init()
            .is_ok()
    };

    if installed {
        tracing::debug!(level = %config.level, json = config.json, "Tracing initialised");
    }
    installed
}
