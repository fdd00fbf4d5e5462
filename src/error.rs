use thiserror::Error;

#[derive(Error, Debug)]
pub enum RleError {
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	#[error("Invalid chunk range {start}..{end} for buffer of {len} bytes")]
	InvalidRange { start: usize, end: usize, len: usize },

	#[error("Chunk partition mismatch: {0}")]
	PartitionMismatch(String),

	#[error("Configuration error: {0}")]
	Config(String),

	#[error("Worker failure: {0}")]
	Worker(String),

	#[error("Serialization failed: {0}")]
	Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RleError>;
