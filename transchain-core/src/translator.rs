use tracing::debug;

use crate::chain::Chain;
use crate::error::{Error, Result};
use crate::localize::Temporal;
use crate::types::{Key, Locale, Options, Resolved};
use crate::value::Value;

/// Caller-facing wrapper around a [`Chain`] with a default locale.
///
/// Unless strict, a missing translation comes back as its message text
/// (`translation missing: en, foo`) instead of an error.
#[derive(Debug, Clone)]
pub struct Translator {
	chain: Chain,
	default_locale: Locale,
	strict: bool,
}

impl Translator {
	pub fn new(chain: Chain, default_locale: impl Into<Locale>) -> Self {
		Self { chain, default_locale: default_locale.into(), strict: false }
	}

	pub fn strict(mut self, strict: bool) -> Self {
		self.strict = strict;
		self
	}

	pub fn is_strict(&self) -> bool { self.strict }
	pub fn default_locale(&self) -> &Locale { &self.default_locale }
	pub fn chain(&self) -> &Chain { &self.chain }
	pub fn chain_mut(&mut self) -> &mut Chain { &mut self.chain }

	pub fn translate(&self, key: impl Into<Key>, options: &Options) -> Result<Resolved> {
		self.translate_in(&self.default_locale, key, options)
	}

	pub fn translate_in(&self, locale: &Locale, key: impl Into<Key>, options: &Options) -> Result<Resolved> {
		match key.into() {
			Key::Bulk(keys) => keys
				.into_iter()
				.map(|k| self.translate_in(locale, k, options))
				.collect::<Result<Vec<_>>>()
				.map(Resolved::Bulk),
			single => self.soften(self.chain.translate(Some(locale), single, options)),
		}
	}

	/// Shorthand for a single leaf; `None` when the key names a namespace.
	pub fn text(&self, key: &str, options: &Options) -> Result<Option<String>> {
		let resolved = self.translate(key, options)?;
		Ok(resolved.into_value().and_then(|v| v.as_str().map(str::to_string)))
	}

	pub fn localize(&self, object: &Temporal, format: &str) -> Result<Value> { self.localize_in(&self.default_locale, object, format) }

	pub fn localize_in(&self, locale: &Locale, object: &Temporal, format: &str) -> Result<Value> {
		match self.soften(self.chain.localize(locale, object, format).map(Resolved::Single))? {
			Resolved::Single(v) => Ok(v),
			Resolved::Bulk(_) => Err(Error::localize("unexpected bulk result")),
		}
	}

	fn soften(&self, result: Result<Resolved>) -> Result<Resolved> {
		match result {
			Err(e) if e.is_missing() && !self.strict => {
				debug!(error = %e, "returning missing-translation placeholder");
				Ok(Resolved::Single(Value::Leaf(e.to_string())))
			}
			other => other,
		}
	}
}
