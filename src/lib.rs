//! # HLC RLE
//!
//! Parallel run-length encoding of a byte buffer. The input is split into
//! contiguous chunks which are encoded independently on a worker pool; a
//! sequential boundary merge then fuses runs that were cut by a chunk boundary,
//! so the result is identical to a single pass over the whole buffer.
//!
//! ## Features
//!
//! - **Chunked Encoding**: Each chunk becomes a [`PartialEncoding`] whose first
//!   and last tokens describe the runs touching its edges
//! - **Boundary Merge**: Runs split across chunks are fused back into a single
//!   token, however many chunks they span
//! - **Parallel Processing**: rayon, scoped channel workers or sequential
//! - **Output Formats**: text (`a3b1`), binary or JSON
//!
//! ## Quick Start
//!
//! ```rust
//! use hlc_rle::{encode_tokens, RleConfig, Token};
//!
//! let config = RleConfig::default().with_workers(2);
//! let tokens = encode_tokens(b"aaaabbc", &config).unwrap();
//! assert_eq!(
//!     tokens,
//!     vec![Token::new(b'a', 4), Token::new(b'b', 2), Token::new(b'c', 1)]
//! );
//! ```
//!
//! ### Serialized output
//!
//! ```rust
//! use hlc_rle::{encode_data, RleConfig};
//!
//! let config = RleConfig::default().with_workers(4);
//! let encoded = encode_data(b"aaaaaaaabbb", &config).unwrap();
//! assert_eq!(encoded, b"a8b3");
//! ```
//!
//! ### Working with Files
//!
//! ```rust
//! use hlc_rle::{pipeline, RleConfig};
//! use std::fs::File;
//! use std::io::{BufReader, BufWriter};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = RleConfig::default();
//!
//! let mut reader = BufReader::new(File::open("test.txt")?);
//! let mut writer = BufWriter::new(File::create("compressed.txt")?);
//!
//! let stats = pipeline::encode(&mut reader, &mut writer, &config)?;
//! println!("{} tokens, {} fused boundaries", stats.token_count, stats.fusions);
//! # Ok(())
//! # }
//! ```

pub mod chunk;
pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod pipeline;
pub mod rle;
pub mod threadpool;
pub mod token;

// Re-export commonly used types for convenience
pub use chunk::{partition, ChunkRange, PartialEncoding};
pub use config::{ExecutionMode, OutputFormat, RleConfig};
pub use error::{Result, RleError};
pub use pipeline::{EncodeStats, Encoded};
pub use rle::{encode, encode_chunk, merge, BoundaryMerger};
pub use token::Token;

/// Encode `data` and return the final token sequence.
pub fn encode_tokens(data: &[u8], config: &RleConfig) -> Result<Vec<Token>> {
    Ok(pipeline::encode_buffer(data, config)?.tokens)
}

/// Encode `data` and serialize the tokens in `config.format`.
pub fn encode_data(data: &[u8], config: &RleConfig) -> Result<Vec<u8>> {
    let tokens = encode_tokens(data, config)?;
    format::to_bytes(&tokens, config.format)
}

/// Single-pass encoding of the whole buffer, with no chunking.
pub fn encode_sequential(data: &[u8]) -> Vec<Token> {
    rle::encoder::encode_runs(data)
}

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

pub fn version_info() -> VersionInfo {
    VersionInfo {
        version: VERSION,
        authors: AUTHORS,
        description: DESCRIPTION,
    }
}

#[derive(Debug, Clone)]
pub struct VersionInfo {
    pub version: &'static str,
    pub authors: &'static str,
    pub description: &'static str,
}
