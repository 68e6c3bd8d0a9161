pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("{message}")]
	InvalidRequest { message: String },
	#[error("Not found: {message}")]
	NotFound { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
}
impl From<reel_storage::Error> for Error {
	fn from(err: reel_storage::Error) -> Self {
		Self::Storage { message: err.to_string() }
	}
}

#[cfg(test)]
mod tests {
	use std::{io, path::PathBuf};

	use super::Error;

	#[test]
	fn every_storage_failure_is_internal() {
		let err = Error::from(reel_storage::Error::ReadCorpus {
			path: PathBuf::from("corpus.json"),
			source: io::Error::other("disk gone"),
		});

		assert!(matches!(err, Error::Storage { .. }));
	}
}
