//! Ordered backend chain.
//!
//! A lookup walks the backends front to back. The first leaf answer wins and
//! the walk stops. Namespace answers (branches and plural maps requested
//! without a count) are deep-merged across every backend that has one, later
//! backends winning at the conflicting leaf only. When nothing matched, the
//! caller's default is resolved through the same chain.

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::backend::Backend;
use crate::error::{Error, Result};
use crate::localize::Temporal;
use crate::types::{DefaultValue, Key, Locale, Lookup, Options, Resolved};
use crate::value::{deep_merge, Value};

#[derive(Clone, Default)]
pub struct Chain {
	backends: Vec<Arc<dyn Backend>>,
}

impl std::fmt::Debug for Chain {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(self.backends.iter().map(|b| b.name())).finish()
	}
}

impl Chain {
	pub fn new() -> Self { Self::default() }

	/// Appends a backend; it is consulted after every backend already present.
	pub fn add<B: Backend + 'static>(&mut self, backend: B) { self.add_shared(Arc::new(backend)) }

	pub fn add_shared(&mut self, backend: Arc<dyn Backend>) {
		info!(backend = backend.name(), position = self.backends.len(), "backend added to chain");
		self.backends.push(backend);
	}

	pub fn with<B: Backend + 'static>(mut self, backend: B) -> Self {
		self.add(backend);
		self
	}

	pub fn len(&self) -> usize { self.backends.len() }
	pub fn is_empty(&self) -> bool { self.backends.is_empty() }
	pub fn backends(&self) -> &[Arc<dyn Backend>] { &self.backends }

	/// Resolves `key` for `locale`.
	///
	/// Bulk keys come back as [`Resolved::Bulk`] in request order; each element
	/// is resolved on its own and any element failing fails the whole call.
	pub fn translate(&self, locale: Option<&Locale>, key: impl Into<Key>, options: &Options) -> Result<Resolved> {
		let locale = match locale {
			Some(l) if !l.is_empty() => l,
			other => return Err(Error::InvalidLocale(other.map(Locale::to_string).unwrap_or_default())),
		};
		self.resolve(locale, key.into(), options)
	}

	fn resolve(&self, locale: &Locale, key: Key, options: &Options) -> Result<Resolved> {
		match key {
			Key::Single(k) => self.translate_scalar(locale, &k, options).map(Resolved::Single),
			Key::Bulk(keys) => keys
				.into_iter()
				.map(|k| self.resolve(locale, k, &options.clone()))
				.collect::<Result<Vec<_>>>()
				.map(Resolved::Bulk),
		}
	}

	fn translate_scalar(&self, locale: &Locale, key: &str, options: &Options) -> Result<Value> {
		let mut options = options.clone();
		let default = options.default.take();

		if let Some(found) = self.fold_backends(locale, key, &options)? {
			return Ok(found);
		}
		if let Some(default) = default {
			if let Some(found) = self.resolve_default(locale, &default, &options)? {
				debug!(%locale, key, "resolved through default");
				return Ok(found);
			}
		}
		Err(Error::missing(locale, key, &options))
	}

	fn fold_backends(&self, locale: &Locale, key: &str, options: &Options) -> Result<Option<Value>> {
		let mut namespace: Option<Value> = None;
		for backend in &self.backends {
			let found = match backend.translate(locale, key, options) {
				Ok(Lookup::Found(v)) => v,
				Ok(Lookup::Missing) => continue,
				Err(e) if e.is_missing() => continue,
				Err(e) if e.is_fatal_for_lookup() => return Err(e),
				Err(e) => {
					warn!(backend = backend.name(), %locale, key, error = %e, "backend failed, skipping");
					continue;
				}
			};
			if found.is_map_like() && !options.has_count() {
				debug!(backend = backend.name(), %locale, key, "merging namespace");
				namespace = Some(match namespace.take() {
					Some(acc) => deep_merge(acc, found),
					None => found,
				});
				continue;
			}
			debug!(backend = backend.name(), %locale, key, "hit");
			return Ok(Some(found));
		}
		Ok(namespace.filter(|ns| !ns.is_empty()))
	}

	// Not-found anywhere below turns into `None`; other errors propagate.
	fn resolve_default(&self, locale: &Locale, default: &DefaultValue, options: &Options) -> Result<Option<Value>> {
		match default {
			DefaultValue::Literal(text) => Ok(Some(Value::leaf(text.as_str()))),
			DefaultValue::Key(key) => match self.translate_scalar(locale, key, options) {
				Ok(v) => Ok(Some(v)),
				Err(e) if e.is_missing() => Ok(None),
				Err(e) => Err(e),
			},
			DefaultValue::List(alternatives) => {
				for alt in alternatives {
					let options = options.clone();
					if let Some(v) = self.resolve_default(locale, alt, &options)? {
						return Ok(Some(v));
					}
				}
				Ok(None)
			}
		}
	}

	/// First backend able to format `object` wins.
	pub fn localize(&self, locale: &Locale, object: &Temporal, format: &str) -> Result<Value> {
		if locale.is_empty() {
			return Err(Error::InvalidLocale(locale.to_string()));
		}
		for backend in &self.backends {
			match backend.localize(locale, object, format) {
				Ok(Lookup::Found(v)) => return Ok(v),
				Ok(Lookup::Missing) => {}
				Err(e @ Error::Localize(_)) => return Err(e),
				Err(e) => warn!(backend = backend.name(), %locale, format, error = %e, "localize failed, skipping"),
			}
		}
		Err(Error::missing(locale, format!("{}.formats.{format}", object.scope()), &Options::new()))
	}

	/// Hands `data` to the first backend that takes writes.
	pub fn store_translations(&self, locale: &Locale, data: &Value) -> Result<bool> {
		for backend in &self.backends {
			if backend.store_translations(locale, data)? {
				debug!(backend = backend.name(), %locale, "stored translations");
				return Ok(true);
			}
		}
		Ok(false)
	}

	pub fn store_translation(&self, locale: &Locale, key: &str, text: &str, count: Option<i64>) -> Result<bool> {
		for backend in &self.backends {
			if backend.store_translation(locale, key, text, count)? {
				return Ok(true);
			}
		}
		Ok(false)
	}

	pub fn load_translations(&self) -> Result<()> { self.backends.iter().try_for_each(|b| b.load_translations()) }

	pub fn reload(&self) -> Result<()> { self.backends.iter().try_for_each(|b| b.reload()) }

	/// Union of every backend's locales, first-seen order.
	pub fn available_locales(&self) -> Result<Vec<Locale>> {
		let mut out: Vec<Locale> = Vec::new();
		for backend in &self.backends {
			for locale in backend.available_locales()? {
				if !out.contains(&locale) {
					out.push(locale);
				}
			}
		}
		Ok(out)
	}
}
