//! Chunked run-length encoding
//!
//! Each chunk is encoded on its own by [`encoder`], then [`merger`] stitches
//! the partial encodings together, fusing runs that were cut by a chunk
//! boundary.

pub mod encoder;
pub mod merger;

pub use encoder::{encode, encode_chunk};
pub use merger::{fused_boundaries, merge, BoundaryMerger};
