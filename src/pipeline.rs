use crate::chunk::{partition, ChunkRange, PartialEncoding};
use crate::config::{ExecutionMode, RleConfig};
use crate::error::{Result, RleError};
use crate::format::write_tokens;
use crate::rle::{encode_chunk, BoundaryMerger};
use crate::threadpool::ChunkWorkerPool;
use crate::token::Token;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;
use std::io::{Read, Write};
use std::time::Instant;

#[derive(Debug, Clone, Serialize)]
pub struct EncodeStats {
	pub original_size: u64,
	pub token_count: usize,
	/// Serialized size; zero until the tokens are written out
	pub encoded_size: u64,
	pub chunks: usize,
	pub fusions: usize,
	pub ratio: f64,
	pub elapsed_ms: u64,
}

impl EncodeStats {
	fn finish(&mut self, encoded_size: u64) {
		self.encoded_size = encoded_size;
		self.ratio = if encoded_size > 0 { self.original_size as f64 / encoded_size as f64 } else { 0.0 };
	}
}

#[derive(Debug)]
pub struct Encoded {
	pub tokens: Vec<Token>,
	pub stats: EncodeStats,
}

/// Read all of `reader`, encode it and write the serialized tokens to `writer`.
pub fn encode<R: Read, W: Write>(
	reader: &mut R,
	writer: &mut W,
	config: &RleConfig,
) -> Result<EncodeStats> {
	let mut buffer = Vec::new();
	reader.read_to_end(&mut buffer)?;

	let Encoded { tokens, mut stats } = encode_buffer(&buffer, config)?;
	let encoded_size = write_tokens(writer, &tokens, config.format)?;
	stats.finish(encoded_size);

	log::info!(
		"Encoded {} bytes into {} tokens ({} bytes, {:.2}x)",
		stats.original_size, stats.token_count, stats.encoded_size, stats.ratio
	);
	Ok(stats)
}

/// Chunk, encode and merge an in-memory buffer.
pub fn encode_buffer(buffer: &[u8], config: &RleConfig) -> Result<Encoded> {
	let start = Instant::now();
	let partials = plan(buffer, config)?;
	let chunks = partials.len();

	let mut merger = BoundaryMerger::new(buffer.len());
	let tokens = merger.merge(partials)?;

	let stats = EncodeStats {
		original_size: buffer.len() as u64,
		token_count: tokens.len(),
		encoded_size: 0,
		chunks,
		fusions: merger.fusions(),
		ratio: 0.0,
		elapsed_ms: start.elapsed().as_millis() as u64,
	};
	log::debug!("Merged {} chunks with {} fusions", chunks, stats.fusions);

	Ok(Encoded { tokens, stats })
}

/// Partition `buffer` and encode every chunk, returning the partials in chunk order.
pub fn plan(buffer: &[u8], config: &RleConfig) -> Result<Vec<PartialEncoding>> {
	config.validate()?;
	let ranges = partition(buffer.len(), config.chunk_count())?;
	log::debug!(
		"Encoding {} bytes in {} chunks on {} workers ({:?})",
		buffer.len(), ranges.len(), config.workers, config.mode
	);

	let pb = progress_bar(ranges.len() as u64, config.progress);

	let mut partials = match config.mode {
		ExecutionMode::Rayon => encode_rayon(buffer, &ranges, config.workers, &pb)?,
		ExecutionMode::Threads => ChunkWorkerPool::new(config.workers)
			.encode_all(buffer, &ranges, |_| pb.inc(1))?,
		ExecutionMode::Sequential => ranges
			.iter()
			.map(|range| {
				let partial = encode_chunk(buffer, *range);
				pb.inc(1);
				partial
			})
			.collect::<Result<Vec<_>>>()?,
	};

	pb.finish_and_clear();

	partials.sort_by_key(|p| p.index());
	Ok(partials)
}

fn encode_rayon(
	buffer: &[u8],
	ranges: &[ChunkRange],
	workers: usize,
	pb: &ProgressBar,
) -> Result<Vec<PartialEncoding>> {
	let pool = rayon::ThreadPoolBuilder::new()
		.num_threads(workers)
		.build()
		.map_err(|e| RleError::Worker(format!("Failed to build thread pool: {}", e)))?;

	pool.install(|| {
		ranges
			.par_iter()
			.map(|range| {
				let partial = encode_chunk(buffer, *range);
				pb.inc(1);
				partial
			})
			.collect::<Result<Vec<_>>>()
	})
}

fn progress_bar(len: u64, visible: bool) -> ProgressBar {
	if !visible {
		return ProgressBar::hidden();
	}

	let pb = ProgressBar::new(len);
	if let Ok(style) = ProgressStyle::default_bar()
		.template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] Chunks {pos}/{len} ({eta})")
	{
		pb.set_style(style.progress_chars("#>-"));
	}
	pb
}
