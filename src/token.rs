//! Run tokens
//!
//! A token is one run of the input: a byte repeated `count` times.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Token {
    pub symbol: u8,
    pub count: usize,
}

impl Token {
    pub fn new(symbol: u8, count: usize) -> Self {
        debug_assert!(count >= 1, "token count must be positive");
        Self { symbol, count }
    }

    /// Extends the run by `count` more occurrences of the same symbol.
    pub fn absorb(&mut self, count: usize) {
        self.count += count;
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", char::from(self.symbol), self.count)
    }
}

/// Total number of input bytes represented by `tokens`.
pub fn represented_len(tokens: &[Token]) -> usize {
    tokens.iter().map(|t| t.count).sum()
}
