use std::sync::Arc;

use crate::error::Result;
use crate::localize::Temporal;
use crate::types::{Locale, Lookup, Options};
use crate::value::Value;

/// A single translation source in a [`crate::Chain`].
///
/// `translate` reports absence as [`Lookup::Missing`]. Errors are reserved for
/// broken data (bad plural entries, missing interpolation values) and for
/// failures of the backing store.
pub trait Backend: Send + Sync {
	fn name(&self) -> &str;

	fn translate(&self, locale: &Locale, key: &str, options: &Options) -> Result<Lookup>;

	/// Best-effort date/time formatting.
	fn localize(&self, _locale: &Locale, _object: &Temporal, _format: &str) -> Result<Lookup> { Ok(Lookup::Missing) }

	/// `Ok(false)` when this backend does not take writes.
	fn store_translation(&self, _locale: &Locale, _key: &str, _text: &str, _count: Option<i64>) -> Result<bool> { Ok(false) }

	/// `Ok(false)` when this backend does not take writes.
	fn store_translations(&self, _locale: &Locale, _data: &Value) -> Result<bool> { Ok(false) }

	fn load_translations(&self) -> Result<()>;

	fn available_locales(&self) -> Result<Vec<Locale>>;

	fn reload(&self) -> Result<()>;
}

impl<B: Backend + ?Sized> Backend for Arc<B> {
	fn name(&self) -> &str { (**self).name() }
	fn translate(&self, locale: &Locale, key: &str, options: &Options) -> Result<Lookup> { (**self).translate(locale, key, options) }
	fn localize(&self, locale: &Locale, object: &Temporal, format: &str) -> Result<Lookup> { (**self).localize(locale, object, format) }
	fn store_translation(&self, locale: &Locale, key: &str, text: &str, count: Option<i64>) -> Result<bool> {
		(**self).store_translation(locale, key, text, count)
	}
	fn store_translations(&self, locale: &Locale, data: &Value) -> Result<bool> { (**self).store_translations(locale, data) }
	fn load_translations(&self) -> Result<()> { (**self).load_translations() }
	fn available_locales(&self) -> Result<Vec<Locale>> { (**self).available_locales() }
	fn reload(&self) -> Result<()> { (**self).reload() }
}
