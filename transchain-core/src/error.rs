use thiserror::Error;

use crate::types::{Locale, Options};

pub type Result<T, E = Error> = core::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
	#[error("invalid locale: {0:?}")]
	InvalidLocale(String),
	#[error("translation missing: {}, {}", .locale, display_key(.key, .options))]
	MissingTranslationData { locale: Locale, key: String, options: Box<Options> },
	#[error("translation data {entry} can not be used with count => {count}")]
	InvalidPluralizationData { entry: String, count: i64 },
	#[error("missing interpolation argument {name} in {text:?}")]
	MissingInterpolationArgument { name: String, text: String },
	#[error("localize: {0}")]
	Localize(String),
	#[error("storage: {0}")]
	Storage(String),
	#[error("config: {0}")]
	Config(String),
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	#[error("json: {0}")]
	Json(#[from] serde_json::Error),
	#[error("toml: {0}")]
	Toml(#[from] toml::de::Error),
}

impl Error {
	pub fn config(msg: impl Into<String>) -> Self { Self::Config(msg.into()) }
	pub fn storage(msg: impl Into<String>) -> Self { Self::Storage(msg.into()) }
	pub fn localize(msg: impl Into<String>) -> Self { Self::Localize(msg.into()) }

	pub fn missing(locale: &Locale, key: impl Into<String>, options: &Options) -> Self {
		Self::MissingTranslationData { locale: locale.clone(), key: key.into(), options: Box::new(options.clone()) }
	}

	pub fn invalid_pluralization(entry: impl std::fmt::Debug, count: i64) -> Self {
		Self::InvalidPluralizationData { entry: format!("{entry:?}"), count }
	}

	pub fn is_missing(&self) -> bool { matches!(self, Self::MissingTranslationData { .. }) }

	/// Errors the chain must surface even when another backend could still answer.
	pub fn is_fatal_for_lookup(&self) -> bool {
		matches!(self, Self::InvalidPluralizationData { .. } | Self::MissingInterpolationArgument { .. } | Self::InvalidLocale(_))
	}
}

// "scope.sub" + "key" => "scope, sub, key"
fn display_key(key: &str, options: &Options) -> String {
	let mut parts: Vec<&str> = Vec::new();
	if let Some(scope) = options.scope.as_deref() {
		parts.extend(scope.split('.').filter(|s| !s.is_empty()));
	}
	parts.extend(key.split('.').filter(|s| !s.is_empty()));
	parts.join(", ")
}
