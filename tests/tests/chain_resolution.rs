// End-to-end chain resolution
//
// Ordering, namespace merging, count handling, defaults and failure
// absorption across several backends.

use transchain_core::{Chain, DefaultValue, Error, Locale, Options, PluralTag, Resolved, Translator, Value};
use transchain_integration_tests::{init_tracing, memory_backend, FailingBackend, SpyBackend, TestResult};
use transchain_store::DatabaseBackend;

fn en() -> Locale { Locale::from("en") }

fn leaf(text: &str) -> Resolved { Resolved::Single(Value::leaf(text)) }

/// A leaf from the first backend stops the walk.
#[test]
fn first_hit_short_circuits() -> TestResult<()> {
	init_tracing();
	let first = SpyBackend::new(memory_backend("b1", Value::branch([("foo", Value::leaf("from b1"))])));
	let second = SpyBackend::new(memory_backend("b2", Value::branch([("foo", Value::leaf("from b2"))])));
	let (first_calls, second_calls) = (first.calls(), second.calls());
	let chain = Chain::new().with(first).with(second);

	assert_eq!(chain.translate(Some(&en()), "foo", &Options::new())?, leaf("from b1"));
	assert_eq!(first_calls.lock().len(), 1);
	assert!(second_calls.lock().is_empty());
	Ok(())
}

#[test]
fn namespaces_merge_in_chain_order() -> TestResult<()> {
	let chain = Chain::new()
		.with(memory_backend(
			"b1",
			Value::branch([("menu", Value::branch([("open", Value::leaf("Open")), ("close", Value::leaf("Close"))]))]),
		))
		.with(memory_backend(
			"b2",
			Value::branch([("menu", Value::branch([("close", Value::leaf("Close all")), ("save", Value::leaf("Save"))]))]),
		));

	let got = chain.translate(Some(&en()), "menu", &Options::new())?;
	assert_eq!(
		got,
		Resolved::Single(Value::branch([
			("open", Value::leaf("Open")),
			("close", Value::leaf("Close all")),
			("save", Value::leaf("Save")),
		]))
	);
	Ok(())
}

/// With a count the first map answer wins and later backends are not asked.
#[test]
fn count_disables_merge() -> TestResult<()> {
	let first = memory_backend("b1", Value::branch([("apples", Value::plural([(PluralTag::One, "an apple"), (PluralTag::Other, "{{count}} apples")]))]));
	let second = SpyBackend::new(memory_backend("b2", Value::branch([("apples", Value::plural([(PluralTag::Other, "lots")]))])));
	let calls = second.calls();
	let chain = Chain::new().with(first).with(second);

	assert_eq!(chain.translate(Some(&en()), "apples", &Options::new().with_count(3))?, leaf("3 apples"));
	assert!(calls.lock().is_empty());

	// without a count both answers are collected; a later plural map replaces an earlier one
	let merged = chain.translate(Some(&en()), "apples", &Options::new())?;
	assert_eq!(merged, Resolved::Single(Value::plural([(PluralTag::Other, "lots")])));
	assert_eq!(calls.lock().len(), 1);
	Ok(())
}

#[test]
fn defaults_are_not_delegated_to_backends() -> TestResult<()> {
	let spy = SpyBackend::new(memory_backend("b1", Value::branch([("fallback", Value::leaf("Fallback"))])));
	let calls = spy.calls();
	let chain = Chain::new().with(spy);

	let options = Options::new().with_default(vec![DefaultValue::key("nope"), DefaultValue::literal("literal")]);
	assert_eq!(chain.translate(Some(&en()), "missing", &options)?, leaf("literal"));

	let options = Options::new().with_default(vec![DefaultValue::key("nope"), DefaultValue::key("fallback")]);
	assert_eq!(chain.translate(Some(&en()), "missing", &options)?, leaf("Fallback"));

	assert!(calls.lock().iter().all(|c| c.options.default.is_none()));
	let keys: Vec<String> = calls.lock().iter().map(|c| c.key.clone()).collect();
	assert_eq!(keys, vec!["missing", "nope", "missing", "nope", "fallback"]);
	Ok(())
}

#[test]
fn invalid_locale_is_fatal() {
	let chain = Chain::new().with(memory_backend("b1", Value::branch([("foo", Value::leaf("Foo"))])));
	assert!(matches!(chain.translate(None, "foo", &Options::new()), Err(Error::InvalidLocale(_))));
	assert!(matches!(chain.translate(Some(&Locale::from("")), "foo", &Options::new()), Err(Error::InvalidLocale(_))));
}

/// A backend that cannot reach its store counts as "nothing found".
#[test]
fn storage_failure_is_absorbed() -> TestResult<()> {
	init_tracing();
	let chain = Chain::new().with(FailingBackend).with(memory_backend("b2", Value::branch([("foo", Value::leaf("Foo"))])));
	assert_eq!(chain.translate(Some(&en()), "foo", &Options::new())?, leaf("Foo"));

	let err = chain.translate(Some(&en()), "bar", &Options::new()).unwrap_err();
	assert!(err.is_missing());
	Ok(())
}

#[test]
fn pluralization_errors_are_not_absorbed() {
	let chain = Chain::new()
		.with(memory_backend("b1", Value::branch([("apples", Value::plural([(PluralTag::Other, "apples")]))])))
		.with(memory_backend("b2", Value::branch([("apples", Value::plural([(PluralTag::One, "an apple")]))])));
	let err = chain.translate(Some(&en()), "apples", &Options::new().with_count(1)).unwrap_err();
	assert!(matches!(err, Error::InvalidPluralizationData { count: 1, .. }));
}

#[test]
fn pluralization_error_in_key_default_propagates() {
	let chain = Chain::new().with(memory_backend("b1", Value::branch([("apples", Value::plural([(PluralTag::Other, "apples")]))])));

	let options = Options::new().with_count(1).with_default(DefaultValue::key("apples"));
	let err = chain.translate(Some(&en()), "pears", &options).unwrap_err();
	assert!(matches!(err, Error::InvalidPluralizationData { count: 1, .. }));

	// a later literal alternative does not mask it
	let options = Options::new().with_count(1).with_default(vec![DefaultValue::key("apples"), DefaultValue::literal("fruit")]);
	let err = chain.translate(Some(&en()), "pears", &options).unwrap_err();
	assert!(matches!(err, Error::InvalidPluralizationData { count: 1, .. }));
}

#[test]
fn database_in_front_of_memory() -> TestResult<()> {
	let db = DatabaseBackend::in_memory(transchain_integration_tests::registry());
	let mut translator = Translator::new(Chain::new(), "en");
	translator.chain_mut().add(db);
	translator.chain_mut().add(memory_backend("files", Value::branch([("title", Value::leaf("Files title")), ("nav", Value::branch([("home", Value::leaf("Home"))]))])));

	translator.chain().store_translation(&en(), "girl", "One girl", Some(1))?;
	translator.chain().store_translation(&en(), "girl", "Many girls", Some(5))?;
	translator.chain().store_translation(&en(), "nav.back", "Back", None)?;

	assert_eq!(translator.text("girl", &Options::new())?.as_deref(), Some("One girl"));
	assert_eq!(translator.text("girl", &Options::new().with_count(5))?.as_deref(), Some("Many girls"));
	assert_eq!(translator.text("title", &Options::new())?.as_deref(), Some("Files title"));
	assert_eq!(
		translator.translate("nav", &Options::new())?,
		Resolved::Single(Value::branch([("back", Value::leaf("Back")), ("home", Value::leaf("Home"))]))
	);
	assert_eq!(translator.text("gone", &Options::new())?.as_deref(), Some("translation missing: en, gone"));
	Ok(())
}

#[test]
fn bulk_keys_resolve_independently() -> TestResult<()> {
	let chain = Chain::new().with(memory_backend("b1", Value::branch([("a", Value::leaf("A")), ("b", Value::leaf("B"))])));
	let got = chain.translate(Some(&en()), vec!["b", "a"], &Options::new())?;
	assert_eq!(got, Resolved::Bulk(vec![leaf("B"), leaf("A")]));
	assert!(chain.translate(Some(&en()), vec!["a", "missing"], &Options::new()).is_err());
	Ok(())
}
