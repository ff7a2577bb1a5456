//! In-memory backend, optionally seeded from TOML or JSON files.
//!
//! Files hold one table per locale:
//!
//! ```toml
//! [en]
//! foo = "Foo"
//!
//! [en.bar]
//! one = "one bar"
//! other = "other bar"
//! ```
//!
//! Without a count a plural entry comes back as the whole tag map.

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::{
	collections::BTreeMap,
	fs,
	path::{Path, PathBuf},
	sync::Arc,
};
use tracing::{debug, info};

use crate::backend::Backend;
use crate::error::{Error, Result};
use crate::localize::{localize_in, Temporal};
use crate::lookup::{translate_in, PluralPolicy};
use crate::pluralizer::PluralizerRegistry;
use crate::tree::TranslationTree;
use crate::types::{Locale, Lookup, Options};
use crate::value::Value;

#[derive(Debug, Default)]
struct State {
	initialized: bool,
	tree: TranslationTree,
}

#[derive(Debug)]
pub struct SimpleBackend {
	name: String,
	pluralizers: Arc<PluralizerRegistry>,
	load_paths: Vec<PathBuf>,
	state: RwLock<State>,
}

impl SimpleBackend {
	pub fn new(pluralizers: Arc<PluralizerRegistry>) -> Self {
		Self { name: "simple".into(), pluralizers, load_paths: Vec::new(), state: RwLock::new(State::default()) }
	}

	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = name.into();
		self
	}

	pub fn with_load_paths<I, P>(mut self, paths: I) -> Self
	where
		I: IntoIterator<Item = P>,
		P: Into<PathBuf>,
	{
		self.load_paths.extend(paths.into_iter().map(Into::into));
		self
	}

	/// Snapshot of everything loaded so far.
	pub fn translations(&self) -> Result<TranslationTree> { Ok(self.loaded()?.tree.clone()) }

	fn loaded(&self) -> Result<RwLockReadGuard<'_, State>> {
		let state = self.state.read();
		if state.initialized {
			return Ok(state);
		}
		drop(state);
		Ok(RwLockWriteGuard::downgrade(self.loaded_mut()?))
	}

	fn loaded_mut(&self) -> Result<RwLockWriteGuard<'_, State>> {
		let mut state = self.state.write();
		if !state.initialized {
			self.load_into(&mut state)?;
		}
		Ok(state)
	}

	// Caller holds the write lock; files are read inside it.
	fn load_into(&self, state: &mut State) -> Result<()> {
		for path in &self.load_paths {
			for (locale, tree) in read_translation_file(path)? {
				state.tree.merge(&locale, tree);
			}
			debug!(backend = %self.name, path = %path.display(), "read translation file");
		}
		state.initialized = true;
		info!(backend = %self.name, files = self.load_paths.len(), locales = state.tree.locales().len(), "translations loaded");
		Ok(())
	}
}

/// Parses a locale-keyed translation file by extension.
pub fn read_translation_file(path: &Path) -> Result<BTreeMap<Locale, Value>> {
	let text = fs::read_to_string(path)?;
	let data = match path.extension().and_then(|e| e.to_str()) {
		Some("toml") => toml::from_str(&text)?,
		Some("json") => serde_json::from_str(&text)?,
		_ => return Err(Error::config(format!("unsupported translation file: {}", path.display()))),
	};
	Ok(data)
}

impl Backend for SimpleBackend {
	fn name(&self) -> &str { &self.name }

	fn translate(&self, locale: &Locale, key: &str, options: &Options) -> Result<Lookup> {
		let state = self.loaded()?;
		translate_in(&state.tree, &self.pluralizers, locale, key, options, PluralPolicy::RawEntry)
	}

	fn localize(&self, locale: &Locale, object: &Temporal, format: &str) -> Result<Lookup> {
		let state = self.loaded()?;
		localize_in(&state.tree, locale, object, format)
	}

	fn store_translation(&self, locale: &Locale, key: &str, text: &str, count: Option<i64>) -> Result<bool> {
		let mut state = self.loaded_mut()?;
		match count {
			None => state.tree.merge_at(locale, key, Value::leaf(text)),
			Some(c) => {
				let tag = self.pluralizers.tag_for(locale, c);
				state.tree.store_form(locale, key, tag, text.to_string());
			}
		}
		debug!(backend = %self.name, %locale, key, "stored translation");
		Ok(true)
	}

	fn store_translations(&self, locale: &Locale, data: &Value) -> Result<bool> {
		if !matches!(data, Value::Branch(_)) {
			return Err(Error::config(format!("translations for {locale} must be a nested map")));
		}
		self.loaded_mut()?.tree.merge(locale, data.clone());
		Ok(true)
	}

	fn load_translations(&self) -> Result<()> { self.load_into(&mut self.state.write()) }

	fn available_locales(&self) -> Result<Vec<Locale>> {
		Ok(self.loaded()?.tree.locales())
	}

	fn reload(&self) -> Result<()> {
		*self.state.write() = State::default();
		debug!(backend = %self.name, "reset");
		Ok(())
	}
}
