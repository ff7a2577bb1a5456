use thiserror::Error;

pub type Result<T, E = StoreError> = core::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum StoreError {
	#[error("redb: {0}")]
	Redb(#[from] redb::Error),
	#[error("corrupt row {key:?}: {reason}")]
	Corrupt { key: String, reason: String },
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
}

impl StoreError {
	pub fn corrupt(key: impl Into<String>, reason: impl Into<String>) -> Self { Self::Corrupt { key: key.into(), reason: reason.into() } }
}

/// Any of redb's per-operation error types.
pub(crate) fn redb_err(e: impl Into<redb::Error>) -> StoreError { StoreError::Redb(e.into()) }

impl From<StoreError> for transchain_core::Error {
	fn from(e: StoreError) -> Self {
		match e {
			StoreError::Io(io) => Self::Io(io),
			other => Self::storage(other.to_string()),
		}
	}
}
