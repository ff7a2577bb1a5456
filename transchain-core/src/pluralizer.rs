//! Per-locale plural rules.
//!
//! A rule maps a count to a [`PluralTag`]. The registry is an explicit object
//! shared by backends (`Arc<PluralizerRegistry>`); it is seeded with the
//! English rule for its default locale, which also answers for every locale
//! without a registered rule.

use parking_lot::RwLock;
use std::{collections::HashMap, fmt, sync::Arc};

use crate::error::{Error, Result};
use crate::types::{Locale, PluralTag};

/// Count → plural tag.
pub type PluralRule = Arc<dyn Fn(i64) -> PluralTag + Send + Sync>;

pub struct PluralizerRegistry {
	default_locale: Locale,
	rules: RwLock<HashMap<Locale, PluralRule>>,
}

impl PluralizerRegistry {
	/// Registry whose default locale is `en` with the English rule.
	pub fn new() -> Self { Self::with_default(Locale::from("en"), rules::rule(rules::english)) }

	pub fn with_default(default_locale: Locale, rule: PluralRule) -> Self {
		let mut map = HashMap::new();
		map.insert(default_locale.clone(), rule);
		Self { default_locale, rules: RwLock::new(map) }
	}

	pub fn default_locale(&self) -> &Locale { &self.default_locale }

	pub fn add_pluralizer(&self, locale: Locale, rule: PluralRule) {
		tracing::debug!(%locale, "registering pluralizer");
		self.rules.write().insert(locale, rule);
	}

	/// Registers one of the [`rules`] by name (`english`, `czech`, ...).
	pub fn add_builtin(&self, locale: Locale, name: &str) -> Result<()> {
		let rule = rules::by_name(name).ok_or_else(|| Error::config(format!("unknown plural rule: {name}")))?;
		self.add_pluralizer(locale, rule);
		Ok(())
	}

	/// Rule for `locale`, or the default locale's rule.
	pub fn pluralizer(&self, locale: &Locale) -> PluralRule {
		let map = self.rules.read();
		match map.get(locale).or_else(|| map.get(&self.default_locale)) {
			Some(rule) => Arc::clone(rule),
			None => rules::rule(rules::english),
		}
	}

	pub fn tag_for(&self, locale: &Locale, count: i64) -> PluralTag { (self.pluralizer(locale))(count) }

	pub fn has_rule(&self, locale: &Locale) -> bool { self.rules.read().contains_key(locale) }
}

impl Default for PluralizerRegistry {
	fn default() -> Self { Self::new() }
}

impl fmt::Debug for PluralizerRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut locales: Vec<String> = self.rules.read().keys().map(ToString::to_string).collect();
		locales.sort_unstable();
		f.debug_struct("PluralizerRegistry").field("default_locale", &self.default_locale).field("locales", &locales).finish()
	}
}

/// Built-in rules, after the CLDR language groups.
pub mod rules {
	use super::PluralRule;
	use crate::types::PluralTag;
	use std::sync::Arc;

	pub fn rule(f: fn(i64) -> PluralTag) -> PluralRule { Arc::new(f) }

	pub fn by_name(name: &str) -> Option<PluralRule> {
		let f: fn(i64) -> PluralTag = match name.to_ascii_lowercase().as_str() {
			"english" | "en" => english,
			"czech" | "cs" | "cz" | "sk" => czech,
			"russian" | "ru" | "uk" => russian,
			"french" | "fr" => french,
			"invariant" | "cjk" | "none" => invariant,
			_ => return None,
		};
		Some(rule(f))
	}

	/// 1 → one, 0 → zero, anything else → other.
	pub fn english(n: i64) -> PluralTag {
		match n {
			1 => PluralTag::One,
			0 => PluralTag::Zero,
			_ => PluralTag::Other,
		}
	}

	/// 1 → one, 2..=4 → few, anything else → other.
	pub fn czech(n: i64) -> PluralTag {
		match n {
			1 => PluralTag::One,
			2..=4 => PluralTag::Few,
			_ => PluralTag::Other,
		}
	}

	pub fn russian(n: i64) -> PluralTag {
		let n = n.unsigned_abs();
		let (m10, m100) = (n % 10, n % 100);
		if m10 == 1 && m100 != 11 {
			PluralTag::One
		} else if (2..=4).contains(&m10) && !(12..=14).contains(&m100) {
			PluralTag::Few
		} else {
			PluralTag::Many
		}
	}

	/// 0 and 1 → one.
	pub fn french(n: i64) -> PluralTag {
		if n.unsigned_abs() <= 1 { PluralTag::One } else { PluralTag::Other }
	}

	pub fn invariant(_: i64) -> PluralTag { PluralTag::Other }
}
