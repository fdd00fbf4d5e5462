use crate::error::{Result, RleError};
use crate::token::{represented_len, Token};

/// A contiguous slice `[start, end)` of the input assigned to one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkRange {
    pub index: usize,
    pub start: usize,
    pub end: usize,
}

impl ChunkRange {
    pub fn new(index: usize, start: usize, end: usize) -> Self {
        Self { index, start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Split `len` bytes into `chunks` contiguous ranges.
///
/// Every chunk gets `len / chunks` bytes and the last one also takes the
/// remainder, so when `len < chunks` all ranges but the last are empty.
pub fn partition(len: usize, chunks: usize) -> Result<Vec<ChunkRange>> {
    if chunks == 0 {
        return Err(RleError::Config("chunk count must be at least 1".to_string()));
    }

    let chunk_size = len / chunks;
    let ranges = (0..chunks)
        .map(|index| {
            let start = index * chunk_size;
            let end = if index == chunks - 1 { len } else { start + chunk_size };
            ChunkRange::new(index, start, end)
        })
        .collect();

    Ok(ranges)
}

/// Run-length encoding of a single chunk, scanned in isolation.
///
/// The token vector is authoritative: the leading run is its first token and
/// the trailing run its last, so both edges stay adjustable without parsing
/// any serialized form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialEncoding {
    pub range: ChunkRange,
    pub tokens: Vec<Token>,
}

impl PartialEncoding {
    pub fn empty(range: ChunkRange) -> Self {
        Self { range, tokens: Vec::new() }
    }

    pub fn index(&self) -> usize {
        self.range.index
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Maximal run starting at the chunk's first byte.
    pub fn leading(&self) -> Option<&Token> {
        self.tokens.first()
    }

    /// Maximal run ending at the chunk's last byte.
    pub fn trailing(&self) -> Option<&Token> {
        self.tokens.last()
    }

    /// Number of input bytes the tokens stand for.
    pub fn represented_len(&self) -> usize {
        represented_len(&self.tokens)
    }
}
