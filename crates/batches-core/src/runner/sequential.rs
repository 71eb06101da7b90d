//! In-order execution on the calling thread.

use anyhow::Result;
use chrono::Local;
use std::time::Instant;

use crate::progress::ProgressSink;
use crate::range::BatchIter;

/// Runs batches in traversal order, stopping at the first failure.
pub(super) fn run_sequential<F>(
    batches: BatchIter,
    work: &F,
    sink: &dyn ProgressSink,
) -> Result<()>
where
    F: Fn(i64, i64) -> Result<()>,
{
    for batch in batches {
        let started = Instant::now();
        sink.start_one(Local::now(), batch);
        tracing::trace!(from = batch.from, to = batch.to, "batch started");
        if let Err(e) = work(batch.from, batch.to) {
            tracing::debug!(from = batch.from, to = batch.to, error = %e, "batch failed");
            return Err(e);
        }
        sink.finish_one(Local::now(), batch, started.elapsed());
    }
    Ok(())
}
