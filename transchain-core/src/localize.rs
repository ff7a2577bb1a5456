use chrono::{Datelike, NaiveDate, NaiveDateTime};
use std::fmt::Write as _;

use crate::error::{Error, Result};
use crate::tree::TranslationTree;
use crate::types::{Locale, Lookup};
use crate::value::Value;

/// Something `localize` can format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Temporal {
	Date(NaiveDate),
	DateTime(NaiveDateTime),
}

impl Temporal {
	/// Root scope of the named formats: `date.formats.*` or `time.formats.*`.
	pub fn scope(&self) -> &'static str {
		match self {
			Self::Date(_) => "date",
			Self::DateTime(_) => "time",
		}
	}

	fn weekday_from_sunday(&self) -> u32 {
		match self {
			Self::Date(d) => d.weekday().num_days_from_sunday(),
			Self::DateTime(dt) => dt.weekday().num_days_from_sunday(),
		}
	}

	fn month(&self) -> u32 {
		match self {
			Self::Date(d) => d.month(),
			Self::DateTime(dt) => dt.month(),
		}
	}
}

impl From<NaiveDate> for Temporal {
	fn from(d: NaiveDate) -> Self { Self::Date(d) }
}

impl From<NaiveDateTime> for Temporal {
	fn from(dt: NaiveDateTime) -> Self { Self::DateTime(dt) }
}

/// Formats `object` with a strftime pattern or a named format.
///
/// `format` without a `%` names an entry under `<scope>.formats`. Missing
/// named formats are `Lookup::Missing`.
pub fn localize_in(tree: &TranslationTree, locale: &Locale, object: &Temporal, format: &str) -> Result<Lookup> {
	let pattern = if format.contains('%') {
		format.to_string()
	} else {
		match tree.lookup(locale, &[object.scope(), "formats", format]).and_then(Value::as_str) {
			Some(p) => p.to_string(),
			None => return Ok(Lookup::Missing),
		}
	};
	let pattern = substitute_names(tree, locale, object, &pattern);

	let mut out = String::new();
	let rendered = match object {
		Temporal::Date(d) => write!(out, "{}", d.format(&pattern)),
		Temporal::DateTime(dt) => write!(out, "{}", dt.format(&pattern)),
	};
	rendered.map_err(|_| Error::localize(format!("invalid format {pattern:?} for {}", object.scope())))?;
	Ok(Lookup::Found(Value::Leaf(out)))
}

// %a %A %b %B from date.{abbr_day_names,day_names,abbr_month_names,month_names}.
fn substitute_names(tree: &TranslationTree, locale: &Locale, object: &Temporal, pattern: &str) -> String {
	let mut out = String::with_capacity(pattern.len());
	let mut chars = pattern.chars();
	while let Some(c) = chars.next() {
		if c != '%' {
			out.push(c);
			continue;
		}
		let Some(conv) = chars.next() else {
			out.push('%');
			break;
		};
		let name = match conv {
			'a' => day_name(tree, locale, "abbr_day_names", object),
			'A' => day_name(tree, locale, "day_names", object),
			'b' => month_name(tree, locale, "abbr_month_names", object),
			'B' => month_name(tree, locale, "month_names", object),
			_ => None,
		};
		match name {
			Some(n) => out.push_str(&n.replace('%', "%%")),
			None => {
				out.push('%');
				out.push(conv);
			}
		}
	}
	out
}

fn day_name(tree: &TranslationTree, locale: &Locale, list: &str, object: &Temporal) -> Option<String> {
	let idx = object.weekday_from_sunday().to_string();
	tree.lookup(locale, &["date", list, idx.as_str()]).and_then(Value::as_str).map(str::to_string)
}

// Lists with a leading placeholder (13 entries) are indexed by month number.
fn month_name(tree: &TranslationTree, locale: &Locale, list: &str, object: &Temporal) -> Option<String> {
	let Some(Value::Branch(names)) = tree.lookup(locale, &["date", list]) else { return None };
	let month = object.month() as usize;
	let idx = if names.len() > 12 { month } else { month - 1 };
	names.get(&idx.to_string()).and_then(Value::as_str).map(str::to_string)
}
