// Config-driven setup
//
// A TOML config naming a redb database and translation files produces a
// working translator; data written through it persists across rebuilds.

use std::fs;
use transchain_core::{ChainConfig, Error, Locale, Options, Resolved, Value};
use transchain_integration_tests::{init_tracing, TestResult};
use transchain_store::build_chain;

fn write_config(dir: &std::path::Path, strict: bool) -> TestResult<std::path::PathBuf> {
	let files = dir.join("en.toml");
	fs::write(&files, "[en]\ntitle = \"Inbox\"\n[en.messages]\none = \"one message\"\nother = \"{{count}} messages\"\n")?;
	let db = dir.join("db").join("translations.redb");
	let config = format!(
		r#"
log_level = "debug"
default_locale = "en"
strict = {strict}

[pluralizers]
cz = "czech"

[[backends]]
kind = "database"
path = {db:?}

[[backends]]
kind = "memory"
load_paths = [{files:?}]
"#
	);
	let path = dir.join("transchain.toml");
	fs::write(&path, config)?;
	Ok(path)
}

#[test]
fn builds_database_then_files() -> TestResult<()> {
	init_tracing();
	let dir = tempfile::tempdir()?;
	let cfg = ChainConfig::load_from_file(write_config(dir.path(), false)?)?;
	assert_eq!(cfg.backends.len(), 2);

	let translator = build_chain(&cfg)?;
	assert_eq!(translator.chain().len(), 2);
	assert_eq!(translator.chain().backends()[0].name(), "database#0");
	assert_eq!(translator.text("title", &Options::new())?.as_deref(), Some("Inbox"));
	assert_eq!(translator.text("messages", &Options::new().with_count(4))?.as_deref(), Some("4 messages"));

	// the database sits first, so its writes shadow the files
	assert!(translator.chain().store_translation(&Locale::from("en"), "title", "Mailbox", None)?);
	assert_eq!(translator.text("title", &Options::new())?.as_deref(), Some("Mailbox"));

	let cz = Locale::from("cz");
	translator.chain().store_translation(&cz, "messages", "{{count}} zprávy", Some(3))?;
	let got = translator.translate_in(&cz, "messages", &Options::new().with_count(2))?;
	assert_eq!(got, Resolved::Single(Value::leaf("2 zprávy")));
	drop(translator);

	let rebuilt = build_chain(&cfg)?;
	assert_eq!(rebuilt.text("title", &Options::new())?.as_deref(), Some("Mailbox"));
	assert_eq!(rebuilt.chain().available_locales()?, vec![Locale::from("cz"), Locale::from("en")]);
	Ok(())
}

#[test]
fn strict_mode_surfaces_missing_translations() -> TestResult<()> {
	let dir = tempfile::tempdir()?;
	let cfg = ChainConfig::load_from_file(write_config(dir.path(), true)?)?;
	let translator = build_chain(&cfg)?;
	assert!(translator.is_strict());
	let err = translator.translate("nope", &Options::new().with_scope("app")).unwrap_err();
	assert!(matches!(err, Error::MissingTranslationData { .. }));
	assert_eq!(err.to_string(), "translation missing: en, app, nope");
	Ok(())
}

#[test]
fn unknown_pluralizer_is_rejected() -> TestResult<()> {
	let dir = tempfile::tempdir()?;
	let path = dir.path().join("bad.toml");
	fs::write(&path, "[pluralizers]\nxx = \"klingon\"\n")?;
	let err = ChainConfig::load_from_file(&path).unwrap_err();
	assert!(matches!(err, Error::Config(_)));
	Ok(())
}
