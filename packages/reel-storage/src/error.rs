use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Sqlx(#[from] sqlx::Error),
	#[error("Failed to read corpus at {path:?}.")]
	ReadCorpus { path: PathBuf, source: std::io::Error },
	#[error("Failed to parse corpus at {path:?}: {source}")]
	ParseCorpus { path: PathBuf, source: serde_json::Error },
	#[error("Invalid match pattern: {0}")]
	Pattern(#[from] regex::Error),
}
