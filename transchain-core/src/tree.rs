use std::collections::BTreeMap;

use crate::types::{Locale, PluralTag};
use crate::value::{deep_merge, Value};

/// In-memory translations, one branch per locale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationTree {
	locales: BTreeMap<Locale, Value>,
}

impl TranslationTree {
	pub fn new() -> Self { Self::default() }

	/// Deep-merges `data` into the locale's root; `data` wins on conflicts.
	pub fn merge(&mut self, locale: &Locale, data: Value) {
		let merged = match self.locales.remove(locale) {
			Some(existing) => deep_merge(existing, data),
			None => data,
		};
		self.locales.insert(locale.clone(), merged);
	}

	/// Merges `entry` at the path spelled by a dotted key.
	pub fn merge_at(&mut self, locale: &Locale, dotted_key: &str, entry: Value) {
		let nested = dotted_key
			.split('.')
			.filter(|s| !s.is_empty())
			.rev()
			.fold(entry, |inner, seg| Value::Branch(BTreeMap::from([(seg.to_string(), inner)])));
		self.merge(locale, nested);
	}

	/// Adds one plural form to whatever forms are already stored at the key.
	pub fn store_form(&mut self, locale: &Locale, dotted_key: &str, tag: PluralTag, text: String) {
		let path: Vec<&str> = dotted_key.split('.').filter(|s| !s.is_empty()).collect();
		let mut forms = self.lookup(locale, &path).and_then(Value::plural_forms).unwrap_or_default();
		forms.insert(tag, text);
		self.merge_at(locale, dotted_key, Value::Plural(forms));
	}

	pub fn lookup<S: AsRef<str>>(&self, locale: &Locale, path: &[S]) -> Option<&Value> {
		self.locales.get(locale)?.lookup(path)
	}

	pub fn locales(&self) -> Vec<Locale> { self.locales.keys().cloned().collect() }

	pub fn iter(&self) -> impl Iterator<Item = (&Locale, &Value)> { self.locales.iter() }
}
