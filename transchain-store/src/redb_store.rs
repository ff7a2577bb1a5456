//! On-disk row store.
//!
//! One redb table keyed by `(locale, key, tag)`; the plain row of a key uses
//! an empty tag. Key order gives `all_rows` its locale-then-key ordering and
//! keeps a row group contiguous.

use redb::{Database, ReadableTable, TableDefinition};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use transchain_core::{Locale, PluralTag, TranslationRow};

use crate::error::{redb_err, Result, StoreError};
use crate::row_store::RowStore;

const TRANSLATIONS: TableDefinition<(&str, &str, &str), &str> = TableDefinition::new("translations");

pub struct RedbRowStore {
	db: Database,
	path: PathBuf,
}

impl std::fmt::Debug for RedbRowStore {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.debug_struct("RedbRowStore").field("path", &self.path).finish() }
}

impl RedbRowStore {
	/// Opens the database at `path`, creating the file and table if needed.
	pub fn open(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref().to_path_buf();
		if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
			std::fs::create_dir_all(parent)?;
		}
		let db = Database::create(&path).map_err(redb_err)?;
		let txn = db.begin_write().map_err(redb_err)?;
		txn.open_table(TRANSLATIONS).map_err(redb_err)?;
		txn.commit().map_err(redb_err)?;
		info!(path = %path.display(), "opened translation store");
		Ok(Self { db, path })
	}

	fn scan<F>(&self, from: (&str, &str, &str), mut keep: F) -> Result<Vec<TranslationRow>>
	where
		F: FnMut(&str, &str) -> bool,
	{
		let txn = self.db.begin_read().map_err(redb_err)?;
		let table = txn.open_table(TRANSLATIONS).map_err(redb_err)?;
		let mut out = Vec::new();
		for entry in table.range(from..).map_err(redb_err)? {
			let (k, v) = entry.map_err(redb_err)?;
			let (locale, key, tag) = k.value();
			if !keep(locale, key) {
				break;
			}
			out.push(TranslationRow::new(Locale::from(locale), key, parse_tag(key, tag)?, v.value()));
		}
		Ok(out)
	}
}

fn parse_tag(key: &str, tag: &str) -> Result<Option<PluralTag>> {
	if tag.is_empty() {
		return Ok(None);
	}
	tag.parse::<PluralTag>().map(Some).map_err(|_| StoreError::corrupt(key, format!("unknown pluralization tag {tag:?}")))
}

impl RowStore for RedbRowStore {
	fn upsert(&self, row: &TranslationRow) -> Result<()> {
		let tag = row.pluralization_tag.map(PluralTag::as_str).unwrap_or("");
		let txn = self.db.begin_write().map_err(redb_err)?;
		{
			let mut table = txn.open_table(TRANSLATIONS).map_err(redb_err)?;
			table.insert((row.locale.as_str(), row.key.as_str(), tag), row.text.as_str()).map_err(redb_err)?;
		}
		txn.commit().map_err(redb_err)?;
		debug!(locale = %row.locale, key = %row.key, tag, "upserted row");
		Ok(())
	}

	fn rows_for(&self, locale: &Locale, key: &str) -> Result<Vec<TranslationRow>> {
		self.scan((locale.as_str(), key, ""), |l, k| l == locale.as_str() && k == key)
	}

	fn all_rows(&self) -> Result<Vec<TranslationRow>> { self.scan(("", "", ""), |_, _| true) }

	fn locales(&self) -> Result<Vec<Locale>> {
		let mut out: Vec<Locale> = self.all_rows()?.into_iter().map(|r| r.locale).collect();
		out.dedup();
		Ok(out)
	}
}
