//! Boundary merger
//!
//! Concatenates partial encodings in chunk order. When the run that ends one
//! chunk and the run that starts the next share a symbol they are the same run
//! of the input, so the last emitted token is extended in place instead of a
//! second token being pushed.

use crate::chunk::PartialEncoding;
use crate::error::{Result, RleError};
use crate::token::Token;

/// Merges the partial encodings of one buffer of `expected_len` bytes.
#[derive(Debug)]
pub struct BoundaryMerger {
    expected_len: usize,
    fusions: usize,
}

impl BoundaryMerger {
    pub fn new(expected_len: usize) -> Self {
        Self { expected_len, fusions: 0 }
    }

    /// Number of chunk boundaries fused by the last call to [`merge`](Self::merge).
    pub fn fusions(&self) -> usize {
        self.fusions
    }

    /// Merge `partials`, which must already be in chunk index order.
    ///
    /// The partition is checked before anything is emitted, so a bad
    /// partition never yields a partially merged result.
    pub fn merge(&mut self, partials: Vec<PartialEncoding>) -> Result<Vec<Token>> {
        self.fusions = 0;
        self.validate(&partials)?;

        let capacity = partials.iter().map(|p| p.tokens.len()).sum();
        let mut output: Vec<Token> = Vec::with_capacity(capacity);

        for partial in partials {
            let mut tokens = partial.tokens.into_iter();
            let Some(leading) = tokens.next() else {
                // empty chunk: no edge to fuse, previous trailing run carries over
                continue;
            };

            match output.last_mut() {
                Some(last) if fuses(last, &leading) => {
                    last.absorb(leading.count);
                    self.fusions += 1;
                    log::debug!(
                        "Fused boundary before chunk {}: {} now spans {} bytes",
                        partial.range.index,
                        char::from(last.symbol),
                        last.count
                    );
                }
                _ => output.push(leading),
            }
            output.extend(tokens);
        }

        Ok(output)
    }

    fn validate(&self, partials: &[PartialEncoding]) -> Result<()> {
        let mut cursor = 0;

        for (position, partial) in partials.iter().enumerate() {
            let range = partial.range;
            if range.index != position {
                return Err(RleError::PartitionMismatch(format!(
                    "expected chunk {} at position {}, found chunk {}",
                    position, position, range.index
                )));
            }
            if range.start > range.end {
                return Err(RleError::PartitionMismatch(format!(
                    "chunk {} has reversed range {}..{}",
                    range.index, range.start, range.end
                )));
            }
            if range.start != cursor {
                let kind = if range.start > cursor { "gap" } else { "overlap" };
                return Err(RleError::PartitionMismatch(format!(
                    "{} before chunk {}: expected start {}, found {}",
                    kind, range.index, cursor, range.start
                )));
            }
            if let Some(token) = partial.tokens.iter().find(|t| t.count == 0) {
                return Err(RleError::PartitionMismatch(format!(
                    "chunk {} has an empty run of {}",
                    range.index,
                    char::from(token.symbol)
                )));
            }
            if let Some(pair) = partial.tokens.windows(2).find(|pair| pair[0].symbol == pair[1].symbol) {
                return Err(RleError::PartitionMismatch(format!(
                    "chunk {} splits one run of {} into two tokens",
                    range.index,
                    char::from(pair[0].symbol)
                )));
            }
            let covered = partial.represented_len();
            if covered != range.len() {
                return Err(RleError::PartitionMismatch(format!(
                    "chunk {} covers {} bytes but its tokens represent {}",
                    range.index,
                    range.len(),
                    covered
                )));
            }
            cursor = range.end;
        }

        if cursor != self.expected_len {
            return Err(RleError::PartitionMismatch(format!(
                "chunks cover {} of {} bytes",
                cursor, self.expected_len
            )));
        }

        Ok(())
    }
}

/// Whether `leading` continues the run of `last`.
fn fuses(last: &Token, leading: &Token) -> bool {
    last.symbol == leading.symbol
}

/// For each partial, whether its leading run fuses with the trailing run of
/// the closest non-empty partial before it. Empty partials never fuse.
pub fn fused_boundaries(partials: &[PartialEncoding]) -> Vec<bool> {
    let mut previous: Option<&Token> = None;

    partials
        .iter()
        .map(|partial| match (partial.leading(), partial.trailing()) {
            (Some(leading), Some(trailing)) => {
                let fused = previous.map_or(false, |last| fuses(last, leading));
                previous = Some(trailing);
                fused
            }
            _ => false,
        })
        .collect()
}

/// Merge `partials` into the final encoding of a buffer of `expected_len` bytes.
pub fn merge(partials: Vec<PartialEncoding>, expected_len: usize) -> Result<Vec<Token>> {
    BoundaryMerger::new(expected_len).merge(partials)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::ChunkRange;
    use crate::rle::encoder::encode_chunk;

    fn encode_split(data: &[u8], bounds: &[usize]) -> Vec<PartialEncoding> {
        let len = data.len();
        let mut start = 0;
        let mut partials = Vec::new();
        for (index, &end) in bounds.iter().chain(std::iter::once(&len)).enumerate() {
            partials.push(encode_chunk(data, ChunkRange::new(index, start, end)).unwrap());
            start = end;
        }
        partials
    }

    #[test]
    fn test_no_fusion() {
        let data = b"aaabbb";
        let mut merger = BoundaryMerger::new(data.len());
        let tokens = merger.merge(encode_split(data, &[3])).unwrap();
        assert_eq!(tokens, vec![Token::new(b'a', 3), Token::new(b'b', 3)]);
        assert_eq!(merger.fusions(), 0);
    }

    #[test]
    fn test_cross_boundary_fusion() {
        let data = b"aaaa";
        let tokens = merge(encode_split(data, &[2]), data.len()).unwrap();
        assert_eq!(tokens, vec![Token::new(b'a', 4)]);
    }

    #[test]
    fn test_three_chunk_double_fusion() {
        let data = b"aaabbbccc";
        let mut merger = BoundaryMerger::new(data.len());
        let tokens = merger.merge(encode_split(data, &[4, 7])).unwrap();
        assert_eq!(
            tokens,
            vec![Token::new(b'a', 3), Token::new(b'b', 3), Token::new(b'c', 3)]
        );
        assert_eq!(merger.fusions(), 2);
    }

    #[test]
    fn test_run_spanning_many_chunks() {
        let data = vec![b'x'; 10];
        let tokens = merge(encode_split(&data, &[1, 2, 5, 9]), data.len()).unwrap();
        assert_eq!(tokens, vec![Token::new(b'x', 10)]);
    }

    #[test]
    fn test_empty_chunks_are_skipped() {
        let data = b"aabbaa";
        let with_empty = merge(encode_split(data, &[2, 2, 4, 4]), data.len()).unwrap();
        let without = merge(encode_split(data, &[2, 4]), data.len()).unwrap();
        assert_eq!(with_empty, without);
    }

    #[test]
    fn test_fusion_across_empty_chunk() {
        let data = b"aaaa";
        let tokens = merge(encode_split(data, &[2, 2]), data.len()).unwrap();
        assert_eq!(tokens, vec![Token::new(b'a', 4)]);
    }

    #[test]
    fn test_empty_input() {
        let tokens = merge(encode_split(b"", &[0, 0]), 0).unwrap();
        assert!(tokens.is_empty());
        assert!(merge(Vec::new(), 0).unwrap().is_empty());
    }

    #[test]
    fn test_gap_rejected() {
        let data = b"abcdef";
        let partials = vec![
            encode_chunk(data, ChunkRange::new(0, 0, 2)).unwrap(),
            encode_chunk(data, ChunkRange::new(1, 3, 6)).unwrap(),
        ];
        assert!(matches!(merge(partials, 6), Err(RleError::PartitionMismatch(_))));
    }

    #[test]
    fn test_overlap_rejected() {
        let data = b"abcdef";
        let partials = vec![
            encode_chunk(data, ChunkRange::new(0, 0, 4)).unwrap(),
            encode_chunk(data, ChunkRange::new(1, 3, 6)).unwrap(),
        ];
        assert!(matches!(merge(partials, 6), Err(RleError::PartitionMismatch(_))));
    }

    #[test]
    fn test_wrong_order_rejected() {
        let data = b"abcdef";
        let mut partials = encode_split(data, &[3]);
        partials.reverse();
        assert!(matches!(merge(partials, 6), Err(RleError::PartitionMismatch(_))));
    }

    #[test]
    fn test_short_coverage_rejected() {
        let data = b"abcdef";
        let partials = vec![encode_chunk(data, ChunkRange::new(0, 0, 4)).unwrap()];
        assert!(matches!(merge(partials, 6), Err(RleError::PartitionMismatch(_))));
    }

    #[test]
    fn test_inconsistent_tokens_rejected() {
        let partials = vec![PartialEncoding {
            range: ChunkRange::new(0, 0, 3),
            tokens: vec![Token::new(b'a', 2)],
        }];
        assert!(matches!(merge(partials, 3), Err(RleError::PartitionMismatch(_))));
    }

    #[test]
    fn test_zero_count_token_rejected() {
        let partials = vec![PartialEncoding {
            range: ChunkRange::new(0, 0, 3),
            tokens: vec![Token { symbol: b'a', count: 0 }, Token::new(b'b', 3)],
        }];
        assert!(matches!(merge(partials, 3), Err(RleError::PartitionMismatch(_))));
    }

    #[test]
    fn test_non_maximal_runs_rejected() {
        let partials = vec![PartialEncoding {
            range: ChunkRange::new(0, 0, 2),
            tokens: vec![Token::new(b'a', 1), Token::new(b'a', 1)],
        }];
        assert!(matches!(merge(partials, 2), Err(RleError::PartitionMismatch(_))));
    }

    #[test]
    fn test_failed_merge_resets_fusions() {
        let data = b"aaaa";
        let mut merger = BoundaryMerger::new(data.len());
        merger.merge(encode_split(data, &[2])).unwrap();
        assert_eq!(merger.fusions(), 1);

        let mut partials = encode_split(data, &[2]);
        partials.reverse();
        assert!(merger.merge(partials).is_err());
        assert_eq!(merger.fusions(), 0);
    }

    #[test]
    fn test_fused_boundaries_match_merger() {
        let data = b"aaabbbccc";
        let partials = encode_split(data, &[2, 4, 4, 5, 7]);
        let fused = fused_boundaries(&partials);
        assert_eq!(fused, vec![false, true, false, true, true, true]);

        let mut merger = BoundaryMerger::new(data.len());
        merger.merge(partials).unwrap();
        assert_eq!(fused.iter().filter(|&&f| f).count(), merger.fusions());
    }

    #[test]
    fn test_fused_boundaries_distinct_symbols() {
        let partials = encode_split(b"aabbcc", &[2, 4]);
        assert_eq!(fused_boundaries(&partials), vec![false, false, false]);
    }

    #[test]
    fn test_repeated_text_does_not_confuse_merge() {
        // "a1" appears both early and at the boundary
        let data = b"a1a1a";
        let tokens = merge(encode_split(data, &[4]), data.len()).unwrap();
        let sequential = merge(encode_split(data, &[]), data.len()).unwrap();
        assert_eq!(tokens, sequential);
    }
}
