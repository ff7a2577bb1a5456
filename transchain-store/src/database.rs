//! Row-store backed translations with an in-memory mirror.
//!
//! Reads go to the mirror, loaded lazily from every row on first use. Loads
//! and writes both run under the mirror write lock: a load reads the rows
//! while holding it, and a write upserts rows then re-reads the affected row
//! group before releasing it, so a read after a write sees it.
//!
//! Without a count, a plural entry resolves to its `one` form ("One girl")
//! and only falls back to the whole map when that form is absent.

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::{collections::BTreeMap, sync::Arc};
use tracing::{debug, info};
use transchain_core::{
	localize::localize_in,
	lookup::{translate_in, PluralPolicy},
	Backend, Error, FlatEntry, Locale, Lookup, Options, PluralizerRegistry, Temporal, TranslationRow, TranslationTree, Value,
};

use crate::row_store::{MemoryRowStore, RowStore};

#[derive(Debug, Default)]
struct Mirror {
	initialized: bool,
	tree: TranslationTree,
}

pub struct DatabaseBackend {
	name: String,
	store: Arc<dyn RowStore>,
	pluralizers: Arc<PluralizerRegistry>,
	mirror: RwLock<Mirror>,
}

impl std::fmt::Debug for DatabaseBackend {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("DatabaseBackend").field("name", &self.name).field("pluralizers", &self.pluralizers).finish_non_exhaustive()
	}
}

impl DatabaseBackend {
	pub fn new(store: Arc<dyn RowStore>, pluralizers: Arc<PluralizerRegistry>) -> Self {
		Self { name: "database".into(), store, pluralizers, mirror: RwLock::new(Mirror::default()) }
	}

	/// Backend over a fresh [`MemoryRowStore`].
	pub fn in_memory(pluralizers: Arc<PluralizerRegistry>) -> Self { Self::new(Arc::new(MemoryRowStore::new()), pluralizers) }

	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = name.into();
		self
	}

	pub fn store(&self) -> &Arc<dyn RowStore> { &self.store }

	/// The mirror flattened per locale.
	pub fn flat_translations(&self) -> transchain_core::Result<BTreeMap<Locale, BTreeMap<String, FlatEntry>>> {
		let mirror = self.loaded()?;
		Ok(mirror.tree.iter().map(|(locale, tree)| (locale.clone(), transchain_core::flatten(tree))).collect())
	}

	/// Reads one row group back: the plain row if there is one, else the tag map.
	pub fn load_entry(&self, locale: &Locale, key: &str) -> transchain_core::Result<Option<Value>> {
		let rows = self.store.rows_for(locale, key)?;
		Ok(group_entry(rows))
	}

	/// Read access to a mirror that has been loaded at least once.
	fn loaded(&self) -> transchain_core::Result<RwLockReadGuard<'_, Mirror>> {
		let mirror = self.mirror.read();
		if mirror.initialized {
			return Ok(mirror);
		}
		drop(mirror);
		let mut mirror = self.mirror.write();
		if !mirror.initialized {
			self.load_into(&mut mirror)?;
		}
		Ok(RwLockWriteGuard::downgrade(mirror))
	}

	fn load_into(&self, mirror: &mut Mirror) -> transchain_core::Result<()> {
		let rows = self.store.all_rows()?;
		let count = rows.len();
		for (locale, tree) in transchain_core::unflatten(rows) {
			mirror.tree.merge(&locale, tree);
		}
		mirror.initialized = true;
		info!(backend = %self.name, rows = count, locales = mirror.tree.locales().len(), "translations loaded");
		Ok(())
	}

	// Holds the mirror write lock across upsert and re-read.
	fn write_entry(&self, locale: &Locale, key: &str, rows: Vec<TranslationRow>) -> transchain_core::Result<()> {
		let mut mirror = self.mirror.write();
		if !mirror.initialized {
			self.load_into(&mut mirror)?;
		}
		for row in &rows {
			self.store.upsert(row)?;
		}
		if let Some(entry) = self.load_entry(locale, key)? {
			mirror.tree.merge_at(locale, key, entry);
		}
		debug!(backend = %self.name, %locale, key, rows = rows.len(), "wrote entry");
		Ok(())
	}
}

fn group_entry(rows: Vec<TranslationRow>) -> Option<Value> {
	let mut forms = BTreeMap::new();
	for row in rows {
		match row.pluralization_tag {
			None => return Some(Value::Leaf(row.text)),
			Some(tag) => {
				forms.insert(tag, row.text);
			}
		}
	}
	(!forms.is_empty()).then_some(Value::Plural(forms))
}

impl Backend for DatabaseBackend {
	fn name(&self) -> &str { &self.name }

	fn translate(&self, locale: &Locale, key: &str, options: &Options) -> transchain_core::Result<Lookup> {
		let mirror = self.loaded()?;
		translate_in(&mirror.tree, &self.pluralizers, locale, key, options, PluralPolicy::Representative)
	}

	fn localize(&self, locale: &Locale, object: &Temporal, format: &str) -> transchain_core::Result<Lookup> {
		let mirror = self.loaded()?;
		localize_in(&mirror.tree, locale, object, format)
	}

	fn store_translation(&self, locale: &Locale, key: &str, text: &str, count: Option<i64>) -> transchain_core::Result<bool> {
		let tag = count.map(|c| self.pluralizers.tag_for(locale, c));
		self.write_entry(locale, key, vec![TranslationRow::new(locale.clone(), key, tag, text)])?;
		Ok(true)
	}

	fn store_translations(&self, locale: &Locale, data: &Value) -> transchain_core::Result<bool> {
		if !matches!(data, Value::Branch(_)) {
			return Err(Error::config(format!("translations for {locale} must be a nested map")));
		}
		for (key, entry) in transchain_core::flatten(data) {
			let rows = entry.into_rows(locale, &key);
			self.write_entry(locale, &key, rows)?;
		}
		Ok(true)
	}

	fn load_translations(&self) -> transchain_core::Result<()> { self.load_into(&mut self.mirror.write()) }

	fn available_locales(&self) -> transchain_core::Result<Vec<Locale>> { Ok(self.store.locales()?) }

	fn reload(&self) -> transchain_core::Result<()> {
		*self.mirror.write() = Mirror::default();
		debug!(backend = %self.name, "mirror dropped");
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use transchain_core::{pluralizer::rules, PluralTag};

	fn backend() -> DatabaseBackend {
		let reg = PluralizerRegistry::new();
		reg.add_pluralizer(Locale::from("cz"), rules::rule(rules::czech));
		DatabaseBackend::in_memory(Arc::new(reg))
	}

	#[test]
	fn girl_without_count_is_the_one_form() {
		let b = backend();
		let en = Locale::from("en");
		b.store_translation(&en, "girl", "One girl", Some(1)).unwrap();
		b.store_translation(&en, "girl", "Many girls", Some(5)).unwrap();
		assert_eq!(b.translate(&en, "girl", &Options::new()).unwrap(), Lookup::Found(Value::leaf("One girl")));
		assert_eq!(b.translate(&en, "girl", &Options::new().with_count(1)).unwrap(), Lookup::Found(Value::leaf("One girl")));
		assert_eq!(b.translate(&en, "girl", &Options::new().with_count(5)).unwrap(), Lookup::Found(Value::leaf("Many girls")));
	}

	#[test]
	fn missing_one_form_returns_raw_entry() {
		let b = backend();
		let en = Locale::from("en");
		b.store_translation(&en, "girl", "Many girls", Some(5)).unwrap();
		assert_eq!(b.translate(&en, "girl", &Options::new()).unwrap(), Lookup::Found(Value::plural([(PluralTag::Other, "Many girls")])));
		assert!(matches!(b.translate(&en, "girl", &Options::new().with_count(1)), Err(Error::InvalidPluralizationData { .. })));
	}

	#[test]
	fn group_entry_prefers_plain_row() {
		let en = Locale::from("en");
		let rows = vec![
			TranslationRow::new(en.clone(), "k", None, "plain"),
			TranslationRow::new(en.clone(), "k", Some(PluralTag::One), "one"),
		];
		assert_eq!(group_entry(rows), Some(Value::leaf("plain")));
		assert_eq!(group_entry(Vec::new()), None);
	}

	#[test]
	fn reload_rebuilds_mirror_from_rows() {
		let b = backend();
		let cz = Locale::from("cz");
		b.store_translation(&cz, "bar", "few cz bar", Some(3)).unwrap();
		b.reload().unwrap();
		assert_eq!(b.translate(&cz, "bar", &Options::new().with_count(2)).unwrap(), Lookup::Found(Value::leaf("few cz bar")));
		assert_eq!(b.available_locales().unwrap(), vec![cz]);
	}
}
