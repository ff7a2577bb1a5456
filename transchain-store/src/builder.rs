use std::sync::Arc;
use tracing::info;
use transchain_core::{BackendConfig, Chain, ChainConfig, Result, SimpleBackend, Translator};

use crate::database::DatabaseBackend;
use crate::redb_store::RedbRowStore;
use crate::row_store::{MemoryRowStore, RowStore};

/// Builds the configured chain, in order, sharing one pluralizer registry.
pub fn build_chain(cfg: &ChainConfig) -> Result<Translator> {
	cfg.validate()?;
	let pluralizers = cfg.pluralizer_registry()?;
	let mut chain = Chain::new();
	for (i, backend) in cfg.backends.iter().enumerate() {
		match backend {
			BackendConfig::Memory { load_paths } => {
				chain.add(SimpleBackend::new(Arc::clone(&pluralizers)).with_name(format!("memory#{i}")).with_load_paths(load_paths.iter().cloned()));
			}
			BackendConfig::Database { path } => {
				let store: Arc<dyn RowStore> = match path {
					Some(p) => Arc::new(RedbRowStore::open(p)?),
					None => Arc::new(MemoryRowStore::new()),
				};
				chain.add(DatabaseBackend::new(store, Arc::clone(&pluralizers)).with_name(format!("database#{i}")));
			}
		}
	}
	info!(backends = chain.len(), default_locale = %cfg.default_locale, strict = cfg.strict, "translation chain built");
	Ok(Translator::new(chain, cfg.default_locale.clone()).strict(cfg.strict))
}
