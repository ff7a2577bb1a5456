//! Read path shared by the bundled backends: find the entry, pluralize it,
//! interpolate it.

use crate::error::{Error, Result};
use crate::pluralizer::PluralizerRegistry;
use crate::tree::TranslationTree;
use crate::types::{Locale, Lookup, Options, PluralTag};
use crate::value::Value;

/// What a backend returns for a plural entry when no count was given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluralPolicy {
	/// The whole tag map.
	RawEntry,
	/// The form for a count of 1, or the raw entry when there is none.
	Representative,
}

pub fn translate_in(
	tree: &TranslationTree,
	pluralizers: &PluralizerRegistry,
	locale: &Locale,
	key: &str,
	options: &Options,
	policy: PluralPolicy,
) -> Result<Lookup> {
	let path = options.key_path(key);
	if path.is_empty() {
		return Ok(Lookup::Missing);
	}
	let Some(entry) = tree.lookup(locale, &path) else {
		return Ok(Lookup::Missing);
	};
	let entry = pluralize(pluralizers, locale, entry, options.count, policy)?;
	let entry = match entry {
		Value::Leaf(text) => Value::Leaf(interpolate(&text, options)?),
		other => other,
	};
	Ok(Lookup::Found(entry))
}

/// Selects the form for `count`.
///
/// A `zero` tag with no `zero` form falls back to `other`. A missing form is
/// an error only when the caller passed a count.
pub fn pluralize(pluralizers: &PluralizerRegistry, locale: &Locale, entry: &Value, count: Option<i64>, policy: PluralPolicy) -> Result<Value> {
	if !entry.is_map_like() {
		return Ok(entry.clone());
	}
	let effective = match (count, policy) {
		(Some(c), _) => c,
		(None, PluralPolicy::RawEntry) => return Ok(entry.clone()),
		(None, PluralPolicy::Representative) => 1,
	};
	let mut tag = pluralizers.tag_for(locale, effective);
	if tag == PluralTag::Zero && !entry.has_plural_form(PluralTag::Zero) {
		tag = PluralTag::Other;
	}
	match (entry.plural_form(tag), count) {
		(Some(text), _) => Ok(Value::leaf(text)),
		(None, Some(c)) => Err(Error::invalid_pluralization(entry, c)),
		(None, None) => Ok(entry.clone()),
	}
}

/// Replaces `{{name}}` with `options.values[name]` (and `{{count}}` with the
/// count). Nothing happens when no values and no count were given.
pub fn interpolate(text: &str, options: &Options) -> Result<String> {
	if options.values.is_empty() && options.count.is_none() {
		return Ok(text.to_string());
	}
	let mut out = String::with_capacity(text.len());
	let mut rest = text;
	while let Some(start) = rest.find("{{") {
		out.push_str(&rest[..start]);
		let after = &rest[start + 2..];
		let Some(end) = after.find("}}") else {
			rest = &rest[start..];
			break;
		};
		let name = after[..end].trim();
		let value = match (name, options.count) {
			("count", Some(c)) => Some(c.to_string()),
			_ => options.values.get(name).cloned(),
		};
		match value {
			Some(v) => out.push_str(&v),
			None if name.is_empty() => out.push_str(&rest[start..start + end + 4]),
			None => return Err(Error::MissingInterpolationArgument { name: name.to_string(), text: text.to_string() }),
		}
		rest = &after[end + 2..];
	}
	out.push_str(rest);
	Ok(out)
}
