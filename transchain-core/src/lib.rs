#![forbid(unsafe_code)]

//! Translation lookup over an ordered chain of backends.
//!
//! Keys resolve to leaves, namespaces (deep-merged across backends) or plural
//! forms selected by a count. Persistent storage lives in `transchain-store`.

pub mod backend;
pub mod chain;
pub mod config;
pub mod error;
pub mod flatten;
pub mod localize;
pub mod logging;
pub mod lookup;
pub mod pluralizer;
pub mod simple;
pub mod translator;
pub mod tree;
pub mod types;
pub mod value;

pub use backend::Backend;
pub use chain::Chain;
pub use config::{BackendConfig, ChainConfig};
pub use error::{Error, Result};
pub use flatten::{flatten, flatten_rows, unflatten, FlatEntry, TranslationRow};
pub use localize::Temporal;
pub use lookup::PluralPolicy;
pub use pluralizer::{PluralRule, PluralizerRegistry};
pub use simple::SimpleBackend;
pub use translator::Translator;
pub use tree::TranslationTree;
pub use types::{DefaultValue, Key, Locale, Lookup, Options, PluralTag, Resolved};
pub use value::{deep_merge, Value};
