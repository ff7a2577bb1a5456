//! Translation entries.
//!
//! A stored entry is a [`Value`]: a plain leaf, a plural map (tag → text) or a
//! branch of nested entries. Untyped input (TOML, JSON) is classified on the
//! way in: a non-empty mapping whose keys are all plural tags and whose values
//! are all scalars becomes [`Value::Plural`]. A namespace that happens to use
//! only tag names as keys is therefore read as plural data, the same way the
//! flattener groups it.
//!
//! A `null` inside a mapping is dropped, so a nulled-out key is missing
//! rather than an empty translation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::PluralTag;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawValue", into = "RawValue")]
pub enum Value {
	Leaf(String),
	Branch(BTreeMap<String, Value>),
	Plural(BTreeMap<PluralTag, String>),
}

impl Value {
	pub fn leaf(text: impl Into<String>) -> Self { Self::Leaf(text.into()) }

	pub fn branch<K, I>(entries: I) -> Self
	where
		K: Into<String>,
		I: IntoIterator<Item = (K, Value)>,
	{
		Self::Branch(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
	}

	pub fn plural<T, I>(forms: I) -> Self
	where
		T: Into<String>,
		I: IntoIterator<Item = (PluralTag, T)>,
	{
		Self::Plural(forms.into_iter().map(|(t, s)| (t, s.into())).collect())
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::Leaf(s) => Some(s),
			_ => None,
		}
	}

	/// Branches and plural maps: the shapes the chain may merge.
	pub fn is_map_like(&self) -> bool { !matches!(self, Self::Leaf(_)) }

	pub fn is_empty(&self) -> bool {
		match self {
			Self::Leaf(_) => false,
			Self::Branch(m) => m.is_empty(),
			Self::Plural(m) => m.is_empty(),
		}
	}

	/// Walks branches along `path`. An empty path returns `self`.
	pub fn lookup<S: AsRef<str>>(&self, path: &[S]) -> Option<&Value> {
		path.iter().try_fold(self, |node, seg| match node {
			Self::Branch(m) => m.get(seg.as_ref()),
			_ => None,
		})
	}

	/// Form stored for `tag`, if this entry can be pluralized at all.
	pub fn plural_form(&self, tag: PluralTag) -> Option<&str> {
		match self {
			Self::Plural(m) => m.get(&tag).map(String::as_str),
			Self::Branch(m) => m.get(tag.as_str()).and_then(Value::as_str),
			Self::Leaf(_) => None,
		}
	}

	pub fn has_plural_form(&self, tag: PluralTag) -> bool { self.plural_form(tag).is_some() }

	/// Plural data in branch clothing: every key is a tag, every child a leaf.
	pub fn looks_plural(&self) -> bool {
		match self {
			Self::Plural(m) => !m.is_empty(),
			Self::Branch(m) => !m.is_empty() && m.iter().all(|(k, v)| PluralTag::is_tag(k) && matches!(v, Value::Leaf(_))),
			Self::Leaf(_) => false,
		}
	}

	/// Tag → text view of a plural-looking entry.
	pub fn plural_forms(&self) -> Option<BTreeMap<PluralTag, String>> {
		match self {
			Self::Plural(m) => Some(m.clone()),
			Self::Branch(m) if self.looks_plural() => {
				m.iter().map(|(k, v)| Some((k.parse().ok()?, v.as_str()?.to_string()))).collect()
			}
			_ => None,
		}
	}
}

/// Recursive merge. Branches merge key by key; any other pairing resolves to
/// `right`.
pub fn deep_merge(left: Value, right: Value) -> Value {
	match (left, right) {
		(Value::Branch(mut l), Value::Branch(r)) => {
			for (k, v) in r {
				let merged = match l.remove(&k) {
					Some(existing) => deep_merge(existing, v),
					None => v,
				};
				l.insert(k, merged);
			}
			Value::Branch(l)
		}
		(_, r) => r,
	}
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawValue {
	Null,
	Text(String),
	Bool(bool),
	Integer(i64),
	Float(f64),
	List(Vec<RawValue>),
	Map(BTreeMap<String, RawValue>),
}

impl RawValue {
	fn scalar(&self) -> Option<String> {
		match self {
			Self::Null => Some(String::new()),
			Self::Text(s) => Some(s.clone()),
			Self::Bool(b) => Some(b.to_string()),
			Self::Integer(i) => Some(i.to_string()),
			Self::Float(f) => Some(f.to_string()),
			Self::List(_) | Self::Map(_) => None,
		}
	}
}

impl From<RawValue> for Value {
	fn from(raw: RawValue) -> Self {
		match raw {
			RawValue::List(items) => Value::Branch(items.into_iter().enumerate().map(|(i, v)| (i.to_string(), v.into())).collect()),
			RawValue::Map(mut map) => {
				map.retain(|_, v| !matches!(v, RawValue::Null));
				let plural: Option<BTreeMap<PluralTag, String>> = if map.is_empty() {
					None
				} else {
					map.iter().map(|(k, v)| Some((k.parse().ok()?, v.scalar()?))).collect()
				};
				match plural {
					Some(forms) => Value::Plural(forms),
					None => Value::Branch(map.into_iter().map(|(k, v)| (k, v.into())).collect()),
				}
			}
			scalar => Value::Leaf(scalar.scalar().unwrap_or_default()),
		}
	}
}

impl From<Value> for RawValue {
	fn from(v: Value) -> Self {
		match v {
			Value::Leaf(s) => RawValue::Text(s),
			Value::Branch(m) => RawValue::Map(m.into_iter().map(|(k, v)| (k, v.into())).collect()),
			Value::Plural(m) => RawValue::Map(m.into_iter().map(|(t, s)| (t.as_str().to_string(), RawValue::Text(s))).collect()),
		}
	}
}
