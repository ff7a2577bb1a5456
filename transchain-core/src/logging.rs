use tracing_subscriber::EnvFilter;

use crate::config::ChainConfig;

/// Installs a fmt subscriber. `RUST_LOG` takes precedence over `level`.
/// Returns `false` when a global subscriber was already set.
pub fn init(level: &str) -> bool {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
	tracing_subscriber::fmt().with_env_filter(filter).with_target(false).try_init().is_ok()
}

pub fn init_from_config(cfg: &ChainConfig) -> bool { init(&cfg.log_level) }
