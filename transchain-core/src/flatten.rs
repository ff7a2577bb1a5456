//! Nested tree ⇄ dotted-key rows.
//!
//! ```text
//! { scope: { foo: { one: "one foo", other: "other foo" }, bar: "a bar" }, global: "not scoped" }
//! =>
//! "scope.foo" => Plural { one: "one foo", other: "other foo" }
//! "scope.bar" => Text("a bar")
//! "global"    => Text("not scoped")
//! ```
//!
//! Plural maps are never scoped through: they stay one row group under their
//! parent's path. A branch of leaves whose keys are all plural tags counts as a
//! plural map here too, even when the tags are meant as ordinary words.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::{Locale, PluralTag};
use crate::value::Value;

/// One flattened entry: a plain text or a whole row group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlatEntry {
	Text(String),
	Plural(BTreeMap<PluralTag, String>),
}

impl FlatEntry {
	pub fn into_value(self) -> Value {
		match self {
			Self::Text(s) => Value::Leaf(s),
			Self::Plural(m) => Value::Plural(m),
		}
	}

	/// Storage rows for this entry under `(locale, key)`.
	pub fn into_rows(self, locale: &Locale, key: &str) -> Vec<TranslationRow> {
		match self {
			Self::Text(text) => vec![TranslationRow::new(locale.clone(), key, None, text)],
			Self::Plural(forms) => forms.into_iter().map(|(tag, text)| TranslationRow::new(locale.clone(), key, Some(tag), text)).collect(),
		}
	}
}

/// Persisted shape: unique on `(locale, key, pluralization_tag)`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TranslationRow {
	pub locale: Locale,
	pub key: String,
	pub pluralization_tag: Option<PluralTag>,
	pub text: String,
}

impl TranslationRow {
	pub fn new(locale: Locale, key: impl Into<String>, pluralization_tag: Option<PluralTag>, text: impl Into<String>) -> Self {
		Self { locale, key: key.into(), pluralization_tag, text: text.into() }
	}
}

/// Flattens a branch into dotted keys. Anything but a branch yields nothing.
pub fn flatten(tree: &Value) -> BTreeMap<String, FlatEntry> {
	let mut flat = BTreeMap::new();
	if let Value::Branch(children) = tree {
		flatten_into(&mut flat, children, None);
	}
	flat
}

fn flatten_into(flat: &mut BTreeMap<String, FlatEntry>, children: &BTreeMap<String, Value>, scope: Option<&str>) {
	for (key, value) in children {
		let path = match scope {
			Some(scope) => format!("{scope}.{key}"),
			None => key.clone(),
		};
		match value {
			Value::Leaf(text) => {
				flat.insert(path, FlatEntry::Text(text.clone()));
			}
			v if v.looks_plural() => {
				if let Some(forms) = v.plural_forms() {
					flat.insert(path, FlatEntry::Plural(forms));
				}
			}
			Value::Branch(nested) => flatten_into(flat, nested, Some(&path)),
			// empty plural map
			Value::Plural(_) => {}
		}
	}
}

/// Rows for a whole locale tree.
pub fn flatten_rows(locale: &Locale, tree: &Value) -> Vec<TranslationRow> {
	flatten(tree).into_iter().flat_map(|(key, entry)| entry.into_rows(locale, &key)).collect()
}

/// Rebuilds one branch per locale from rows.
///
/// A plain row beats plural rows for the same key, matching how a single row
/// group is read back. A leaf sitting where a branch is needed is replaced.
pub fn unflatten<I>(rows: I) -> BTreeMap<Locale, Value>
where
	I: IntoIterator<Item = TranslationRow>,
{
	let mut data: BTreeMap<Locale, BTreeMap<String, Value>> = BTreeMap::new();
	for row in rows {
		let root = data.entry(row.locale.clone()).or_default();
		insert_row(root, row);
	}
	data.into_iter().map(|(locale, tree)| (locale, Value::Branch(tree))).collect()
}

fn insert_row(root: &mut BTreeMap<String, Value>, row: TranslationRow) {
	let mut segments: Vec<&str> = row.key.split('.').filter(|s| !s.is_empty()).collect();
	let Some(last) = segments.pop() else {
		tracing::warn!(locale = %row.locale, "skipping row with empty key");
		return;
	};

	let mut node = root;
	for seg in segments {
		let entry = node.entry(seg.to_string()).or_insert_with(|| Value::Branch(BTreeMap::new()));
		if !matches!(entry, Value::Branch(_)) {
			tracing::warn!(locale = %row.locale, key = %row.key, segment = seg, "replacing leaf with branch");
			*entry = Value::Branch(BTreeMap::new());
		}
		node = match entry {
			Value::Branch(m) => m,
			_ => return,
		};
	}

	let key = last.to_string();
	match row.pluralization_tag {
		None => {
			node.insert(key, Value::Leaf(row.text));
		}
		Some(tag) => match node.get_mut(&key) {
			Some(Value::Plural(forms)) => {
				forms.insert(tag, row.text);
			}
			Some(Value::Leaf(_)) => {}
			_ => {
				node.insert(key, Value::Plural(BTreeMap::from([(tag, row.text)])));
			}
		},
	}
}
