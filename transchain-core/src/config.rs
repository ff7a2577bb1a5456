use serde::{Deserialize, Serialize};
use std::{
	collections::BTreeMap,
	fs,
	path::{Path, PathBuf},
	sync::Arc,
};

use crate::error::{Error, Result};
use crate::pluralizer::{rules, PluralizerRegistry};
use crate::types::Locale;

/// One chain member, in chain order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BackendConfig {
	Memory {
		#[serde(default)]
		load_paths: Vec<PathBuf>,
	},
	/// In-memory row store when `path` is absent.
	Database {
		#[serde(default, skip_serializing_if = "Option::is_none")]
		path: Option<PathBuf>,
	},
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ChainConfig {
	pub log_level: String,
	pub default_locale: Locale,
	/// Missing translations are errors instead of placeholder text.
	pub strict: bool,
	/// Locale to built-in rule name (`english`, `czech`, `russian`, `french`, `invariant`).
	pub pluralizers: BTreeMap<Locale, String>,
	pub backends: Vec<BackendConfig>,
}

impl Default for ChainConfig {
	fn default() -> Self {
		Self {
			log_level: "info".into(),
			default_locale: Locale::from("en"),
			strict: false,
			pluralizers: BTreeMap::new(),
			backends: vec![BackendConfig::Memory { load_paths: Vec::new() }],
		}
	}
}

impl ChainConfig {
	pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
		let data = fs::read_to_string(path)?;
		let cfg: Self = toml::from_str(&data).map_err(|e| Error::config(format!("toml parse error: {e}")))?;
		cfg.validate()?;
		Ok(cfg)
	}

	/// Defaults overridden by `TRANSCHAIN_*` variables. `TRANSCHAIN_DB_PATH`
	/// puts a database backend in front of the default memory backend.
	pub fn from_env() -> Result<Self> {
		let mut cfg = Self::default();
		if let Ok(v) = std::env::var("TRANSCHAIN_LOG_LEVEL") { cfg.log_level = v; }
		if let Ok(v) = std::env::var("TRANSCHAIN_DEFAULT_LOCALE") { cfg.default_locale = Locale::from(v); }
		if let Ok(v) = std::env::var("TRANSCHAIN_STRICT") { cfg.strict = v == "1" || v.eq_ignore_ascii_case("true"); }
		if let Ok(v) = std::env::var("TRANSCHAIN_DB_PATH") {
			cfg.backends.insert(0, BackendConfig::Database { path: Some(PathBuf::from(v)) });
		}
		cfg.validate()?;
		Ok(cfg)
	}

	pub fn validate(&self) -> Result<()> {
		let allowed = ["trace", "debug", "info", "warn", "error"];
		if !allowed.contains(&self.log_level.as_str()) {
			return Err(Error::config(format!("invalid log_level: {}", self.log_level)));
		}
		if self.default_locale.is_empty() {
			return Err(Error::config("default_locale must not be empty"));
		}
		if self.backends.is_empty() {
			return Err(Error::config("at least one backend is required"));
		}
		for (locale, name) in &self.pluralizers {
			if locale.is_empty() {
				return Err(Error::config("pluralizer locale must not be empty"));
			}
			if rules::by_name(name).is_none() {
				return Err(Error::config(format!("unknown pluralizer {name:?} for {locale}")));
			}
		}
		Ok(())
	}

	pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
		let text = toml::to_string_pretty(self).map_err(|e| Error::config(format!("toml serialize error: {e}")))?;
		fs::write(path, text)?;
		Ok(())
	}

	/// Registry seeded with English for the default locale plus every
	/// configured rule.
	pub fn pluralizer_registry(&self) -> Result<Arc<PluralizerRegistry>> {
		let registry = PluralizerRegistry::with_default(self.default_locale.clone(), rules::rule(rules::english));
		for (locale, name) in &self.pluralizers {
			registry.add_builtin(locale.clone(), name)?;
		}
		Ok(Arc::new(registry))
	}
}
