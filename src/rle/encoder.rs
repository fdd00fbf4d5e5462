//! Chunk encoder
//!
//! Scans one byte range exactly once and coalesces consecutive equal bytes
//! into tokens.

use crate::chunk::{ChunkRange, PartialEncoding};
use crate::error::{Result, RleError};
use crate::token::Token;

/// Encode `buffer[start..end)` as chunk 0.
pub fn encode(buffer: &[u8], start: usize, end: usize) -> Result<PartialEncoding> {
    encode_chunk(buffer, ChunkRange::new(0, start, end))
}

/// Encode the bytes covered by `range`.
pub fn encode_chunk(buffer: &[u8], range: ChunkRange) -> Result<PartialEncoding> {
    if range.start > range.end || range.end > buffer.len() {
        return Err(RleError::InvalidRange {
            start: range.start,
            end: range.end,
            len: buffer.len(),
        });
    }

    let data = &buffer[range.start..range.end];
    let tokens = encode_runs(data);

    log::debug!(
        "Chunk {} [{}..{}) -> {} tokens",
        range.index,
        range.start,
        range.end,
        tokens.len()
    );

    Ok(PartialEncoding { range, tokens })
}

/// Single-pass run coalescing of `data`.
pub(crate) fn encode_runs(data: &[u8]) -> Vec<Token> {
    let mut tokens: Vec<Token> = Vec::new();

    for &byte in data {
        match tokens.last_mut() {
            Some(last) if last.symbol == byte => last.absorb(1),
            _ => tokens.push(Token::new(byte, 1)),
        }
    }

    tokens
}
