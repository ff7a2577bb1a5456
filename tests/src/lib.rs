// Integration test support for transchain.
//
// Provides:
// - SpyBackend: wraps a backend and records every lookup it receives
// - FailingBackend: a backend whose store is unreachable
// - fixtures for registries and seeded backends

use std::sync::Arc;

use parking_lot::Mutex;
use transchain_core::{
	pluralizer::rules, Backend, Error, Locale, Lookup, Options, PluralizerRegistry, Result as CoreResult, SimpleBackend, Value,
};

/// Test result type alias
pub type TestResult<T> = anyhow::Result<T>;

/// Installs a test-writer subscriber once per test binary.
pub fn init_tracing() {
	let _ = tracing_subscriber::fmt().with_test_writer().with_max_level(tracing::Level::DEBUG).try_init();
}

/// Registry with English as default and the Czech rule for `cz`.
pub fn registry() -> Arc<PluralizerRegistry> {
	let reg = PluralizerRegistry::new();
	reg.add_pluralizer(Locale::from("cz"), rules::rule(rules::czech));
	Arc::new(reg)
}

/// In-memory backend seeded with `data` for `en`.
pub fn memory_backend(name: &str, data: Value) -> SimpleBackend {
	let backend = SimpleBackend::new(registry()).with_name(name);
	if let Err(e) = backend.store_translations(&Locale::from("en"), &data) {
		panic!("seeding {name}: {e}");
	}
	backend
}

/// Lookup recorded by a [`SpyBackend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
	pub locale: Locale,
	pub key: String,
	pub options: Options,
}

/// Forwards to an inner backend and records each `translate` call.
pub struct SpyBackend<B> {
	inner: B,
	calls: Arc<Mutex<Vec<Call>>>,
}

impl<B: Backend> SpyBackend<B> {
	pub fn new(inner: B) -> Self { Self { inner, calls: Arc::new(Mutex::new(Vec::new())) } }

	/// Shared handle that stays readable after the spy moves into a chain.
	pub fn calls(&self) -> Arc<Mutex<Vec<Call>>> { Arc::clone(&self.calls) }
}

impl<B: Backend> Backend for SpyBackend<B> {
	fn name(&self) -> &str { self.inner.name() }

	fn translate(&self, locale: &Locale, key: &str, options: &Options) -> CoreResult<Lookup> {
		self.calls.lock().push(Call { locale: locale.clone(), key: key.to_string(), options: options.clone() });
		self.inner.translate(locale, key, options)
	}

	fn store_translation(&self, locale: &Locale, key: &str, text: &str, count: Option<i64>) -> CoreResult<bool> {
		self.inner.store_translation(locale, key, text, count)
	}

	fn store_translations(&self, locale: &Locale, data: &Value) -> CoreResult<bool> { self.inner.store_translations(locale, data) }

	fn load_translations(&self) -> CoreResult<()> { self.inner.load_translations() }

	fn available_locales(&self) -> CoreResult<Vec<Locale>> { self.inner.available_locales() }

	fn reload(&self) -> CoreResult<()> { self.inner.reload() }
}

/// Every read fails the way an unreachable database would.
#[derive(Debug, Default)]
pub struct FailingBackend;

impl Backend for FailingBackend {
	fn name(&self) -> &str { "failing" }

	fn translate(&self, _locale: &Locale, key: &str, _options: &Options) -> CoreResult<Lookup> {
		Err(Error::storage(format!("connection refused while reading {key}")))
	}

	fn load_translations(&self) -> CoreResult<()> { Err(Error::storage("connection refused")) }

	fn available_locales(&self) -> CoreResult<Vec<Locale>> { Ok(Vec::new()) }

	fn reload(&self) -> CoreResult<()> { Ok(()) }
}
