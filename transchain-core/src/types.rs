use serde::{Deserialize, Serialize};
use std::{borrow::Borrow, collections::BTreeMap, fmt, str::FromStr};

use crate::error::Error;
use crate::value::Value;

/// Locale tag used as the partition key of every store (`en`, `cz`, `pt-BR`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locale(String);

impl Locale {
	pub fn new(tag: impl Into<String>) -> Self { Self(tag.into()) }
	pub fn as_str(&self) -> &str { &self.0 }
	pub fn is_empty(&self) -> bool { self.0.trim().is_empty() }
}

impl fmt::Display for Locale {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl From<&str> for Locale {
	fn from(s: &str) -> Self { Self(s.to_string()) }
}

impl From<String> for Locale {
	fn from(s: String) -> Self { Self(s) }
}

impl AsRef<str> for Locale {
	fn as_ref(&self) -> &str { &self.0 }
}

impl Borrow<str> for Locale {
	fn borrow(&self) -> &str { &self.0 }
}

/// Plural categories. The declaration order is the storage order of a row group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PluralTag {
	Zero,
	One,
	Two,
	Few,
	Many,
	Other,
}

impl PluralTag {
	/// Every tag the flattener treats as a pluralization key.
	pub const ALL: [PluralTag; 6] = [Self::Zero, Self::One, Self::Two, Self::Few, Self::Many, Self::Other];

	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Zero => "zero",
			Self::One => "one",
			Self::Two => "two",
			Self::Few => "few",
			Self::Many => "many",
			Self::Other => "other",
		}
	}

	pub fn is_tag(key: &str) -> bool { key.parse::<PluralTag>().is_ok() }
}

impl fmt::Display for PluralTag {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for PluralTag {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|t| t.as_str() == s)
			.ok_or_else(|| Error::config(format!("unknown plural tag: {s}")))
	}
}

/// A single dotted key or an ordered batch of keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
	Single(String),
	Bulk(Vec<Key>),
}

impl From<&str> for Key {
	fn from(s: &str) -> Self { Self::Single(s.to_string()) }
}

impl From<String> for Key {
	fn from(s: String) -> Self { Self::Single(s) }
}

impl From<&String> for Key {
	fn from(s: &String) -> Self { Self::Single(s.clone()) }
}

impl<K: Into<Key>> From<Vec<K>> for Key {
	fn from(keys: Vec<K>) -> Self { Self::Bulk(keys.into_iter().map(Into::into).collect()) }
}

/// Fallback used when no backend knows the key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultValue {
	/// Returned as-is.
	Literal(String),
	/// Re-translated through the whole chain.
	Key(String),
	/// Tried in order, first hit wins.
	List(Vec<DefaultValue>),
}

impl DefaultValue {
	pub fn literal(text: impl Into<String>) -> Self { Self::Literal(text.into()) }
	pub fn key(key: impl Into<String>) -> Self { Self::Key(key.into()) }
}

impl From<Vec<DefaultValue>> for DefaultValue {
	fn from(list: Vec<DefaultValue>) -> Self { Self::List(list) }
}

/// Per-call lookup options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
	/// Drives pluralization. Its presence also turns off namespace merging.
	pub count: Option<i64>,
	pub default: Option<DefaultValue>,
	/// Dotted prefix prepended to the key.
	pub scope: Option<String>,
	/// Interpolation variables.
	pub values: BTreeMap<String, String>,
}

impl Options {
	pub fn new() -> Self { Self::default() }

	pub fn with_count(mut self, count: i64) -> Self {
		self.count = Some(count);
		self
	}

	pub fn with_default(mut self, default: impl Into<DefaultValue>) -> Self {
		self.default = Some(default.into());
		self
	}

	pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
		self.scope = Some(scope.into());
		self
	}

	pub fn with_value(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.values.insert(name.into(), value.into());
		self
	}

	pub fn has_count(&self) -> bool { self.count.is_some() }

	/// Full lookup path: scope segments followed by key segments.
	pub fn key_path(&self, key: &str) -> Vec<String> {
		let scope = self.scope.as_deref().unwrap_or_default();
		scope
			.split('.')
			.chain(key.split('.'))
			.filter(|s| !s.is_empty())
			.map(str::to_string)
			.collect()
	}
}

/// Outcome of a single backend query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
	Found(Value),
	Missing,
}

/// Result of a chain translation, shaped like the requested [`Key`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
	Single(Value),
	Bulk(Vec<Resolved>),
}

impl Resolved {
	pub fn into_value(self) -> Option<Value> {
		match self {
			Self::Single(v) => Some(v),
			Self::Bulk(_) => None,
		}
	}
}
