//! Scoped worker pool for chunk encoding
//!
//! Workers borrow the shared input read-only, pull chunk ranges from a task
//! channel and send `(index, result)` pairs back. Results arrive in whatever
//! order the workers finish and are put back into per-index slots.

use crate::chunk::{ChunkRange, PartialEncoding};
use crate::error::{Result, RleError};
use crate::rle::encode_chunk;
use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use std::thread;

/// Result of encoding one chunk, tagged with its chunk index
#[derive(Debug)]
pub struct ChunkResult {
    pub index: usize,
    pub result: Result<PartialEncoding>,
}

pub struct ChunkWorkerPool {
    num_workers: usize,
}

impl ChunkWorkerPool {
    pub fn new(num_workers: usize) -> Self {
        Self { num_workers: num_workers.max(1) }
    }

    pub fn num_workers(&self) -> usize {
        self.num_workers
    }

    /// Encode every range of `buffer` and return the partials in chunk order.
    ///
    /// `on_done` runs on the collecting thread once per finished chunk.
    pub fn encode_all<F>(
        &self,
        buffer: &[u8],
        ranges: &[ChunkRange],
        mut on_done: F,
    ) -> Result<Vec<PartialEncoding>>
    where
        F: FnMut(&PartialEncoding),
    {
        if let Some((position, range)) = ranges.iter().enumerate().find(|(i, r)| r.index != *i) {
            return Err(RleError::PartitionMismatch(format!(
                "expected chunk {} at position {}, found chunk {}",
                position, position, range.index
            )));
        }

        let (task_sender, task_receiver) = bounded::<ChunkRange>(ranges.len().max(1));
        let (result_sender, result_receiver) = unbounded::<ChunkResult>();

        for range in ranges {
            task_sender
                .send(*range)
                .map_err(|e| RleError::Worker(format!("Failed to submit chunk: {}", e)))?;
        }
        drop(task_sender);

        let mut slots: Vec<Option<PartialEncoding>> = vec![None; ranges.len()];
        let mut first_error: Option<RleError> = None;

        thread::scope(|scope| {
            let handles: Vec<_> = (0..self.num_workers.min(ranges.len().max(1)))
                .map(|worker_id| {
                    let task_receiver = task_receiver.clone();
                    let result_sender = result_sender.clone();
                    scope.spawn(move || Self::worker_loop(worker_id, buffer, task_receiver, result_sender))
                })
                .collect();
            drop(result_sender);

            for ChunkResult { index, result } in result_receiver.iter() {
                match result {
                    Ok(partial) => {
                        on_done(&partial);
                        slots[index] = Some(partial);
                    }
                    Err(e) => {
                        log::error!("Chunk {} failed: {}", index, e);
                        if first_error.is_none() {
                            first_error = Some(e);
                        }
                    }
                }
            }

            for (worker_id, handle) in handles.into_iter().enumerate() {
                if handle.join().is_err() && first_error.is_none() {
                    first_error = Some(RleError::Worker(format!("Worker {} panicked", worker_id)));
                }
            }
        });

        if let Some(e) = first_error {
            return Err(e);
        }

        slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| {
                slot.ok_or_else(|| RleError::Worker(format!("No result for chunk {}", index)))
            })
            .collect()
    }

    fn worker_loop(
        worker_id: usize,
        buffer: &[u8],
        task_receiver: Receiver<ChunkRange>,
        result_sender: Sender<ChunkResult>,
    ) {
        log::debug!("Worker {} started", worker_id);

        while let Ok(range) = task_receiver.recv() {
            let result = encode_chunk(buffer, range);
            if let Err(e) = result_sender.send(ChunkResult { index: range.index, result }) {
                log::error!("Worker {} failed to send result: {}", worker_id, e);
                break;
            }
        }

        log::debug!("Worker {} finished", worker_id);
    }
}
