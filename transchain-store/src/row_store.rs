use parking_lot::Mutex;
use std::collections::BTreeMap;
use transchain_core::{Locale, PluralTag, TranslationRow};

use crate::error::Result;

/// Persistence for translation rows, unique on `(locale, key, tag)`.
pub trait RowStore: Send + Sync {
	/// Inserts or replaces the row with the same `(locale, key, tag)`.
	fn upsert(&self, row: &TranslationRow) -> Result<()>;

	/// The row group for one key: the plain row and every tagged row.
	fn rows_for(&self, locale: &Locale, key: &str) -> Result<Vec<TranslationRow>>;

	/// Everything, ordered by locale then key.
	fn all_rows(&self) -> Result<Vec<TranslationRow>>;

	fn locales(&self) -> Result<Vec<Locale>>;
}

type RowKey = (Locale, String, Option<PluralTag>);

/// Volatile store for tests and for `database` backends without a path.
#[derive(Debug, Default)]
pub struct MemoryRowStore {
	rows: Mutex<BTreeMap<RowKey, String>>,
}

impl MemoryRowStore {
	pub fn new() -> Self { Self::default() }

	pub fn len(&self) -> usize { self.rows.lock().len() }

	pub fn is_empty(&self) -> bool { self.rows.lock().is_empty() }
}

fn to_row(((locale, key, tag), text): (&RowKey, &String)) -> TranslationRow { TranslationRow::new(locale.clone(), key.clone(), *tag, text.clone()) }

impl RowStore for MemoryRowStore {
	fn upsert(&self, row: &TranslationRow) -> Result<()> {
		self.rows.lock().insert((row.locale.clone(), row.key.clone(), row.pluralization_tag), row.text.clone());
		Ok(())
	}

	fn rows_for(&self, locale: &Locale, key: &str) -> Result<Vec<TranslationRow>> {
		let rows = self.rows.lock();
		// `None` sorts before every tag, so the group starts at the plain row.
		let from: RowKey = (locale.clone(), key.to_string(), None);
		Ok(rows.range(from..).take_while(|((l, k, _), _)| l == locale && k == key).map(to_row).collect())
	}

	fn all_rows(&self) -> Result<Vec<TranslationRow>> { Ok(self.rows.lock().iter().map(to_row).collect()) }

	fn locales(&self) -> Result<Vec<Locale>> {
		let rows = self.rows.lock();
		let mut out: Vec<Locale> = rows.keys().map(|(l, _, _)| l.clone()).collect();
		out.dedup();
		Ok(out)
	}
}
