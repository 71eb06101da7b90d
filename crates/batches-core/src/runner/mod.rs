//! Batch sweep runner.
//!
//! Drives a `BatchIter` and applies the caller's work function to every batch,
//! either in order on the calling thread (`concurrency <= 1`) or across a
//! bounded pool of worker threads. The first work failure ends the run and is
//! returned unchanged.

mod concurrent;
mod sequential;

use anyhow::Result;
use std::time::Instant;

use crate::progress::{NoProgress, ProgressSink};
use crate::range::BatchIter;

/// Configured sweep over `[from, to]`.
///
/// `work` is called with each batch's `(from, to)` bounds. With a concurrency
/// above 1 it is called from several threads at once and must do its own
/// synchronization.
pub struct Batches<F> {
    from: i64,
    to: i64,
    batch_size: u32,
    concurrency: u16,
    work: F,
    progress: Option<Box<dyn ProgressSink>>,
}

impl<F> Batches<F>
where
    F: Fn(i64, i64) -> Result<()> + Sync,
{
    /// A sequential sweep with batch size 1 and no progress output.
    pub fn new(from: i64, to: i64, work: F) -> Self {
        Self {
            from,
            to,
            batch_size: 1,
            concurrency: 1,
            work,
            progress: None,
        }
    }

    /// Maximum elements per batch; 0 is treated as 1.
    pub fn batch_size(mut self, batch_size: u32) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Worker count; 0 and 1 run sequentially.
    pub fn concurrency(mut self, concurrency: u16) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn progress(mut self, sink: impl ProgressSink + 'static) -> Self {
        self.progress = Some(Box::new(sink));
        self
    }

    /// Runs every batch and returns the first work failure, if any.
    ///
    /// A `ConfigError` is returned before any batch runs when the range cannot
    /// be planned. Work errors are returned as produced, without added context.
    pub fn run(&self) -> Result<()> {
        let batches = BatchIter::new(self.from, self.to, self.batch_size)?;
        let plan = batches.plan(self.concurrency);
        let sink: &dyn ProgressSink = match &self.progress {
            Some(sink) => sink.as_ref(),
            None => &NoProgress,
        };

        tracing::debug!(
            from = plan.from,
            to = plan.to,
            batch_size = plan.batch_size,
            total_batches = plan.total_batches,
            workers = plan.workers(),
            "batch run starting"
        );
        let started = Instant::now();
        sink.begin(&plan);

        let res = if plan.is_concurrent() {
            concurrent::run_concurrent(batches, plan.workers(), &self.work, sink)
        } else {
            sequential::run_sequential(batches, &self.work, sink)
        };

        match res {
            Ok(()) => {
                let elapsed = started.elapsed();
                sink.end(&plan, elapsed);
                tracing::debug!(
                    total_batches = plan.total_batches,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "batch run completed"
                );
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "batch run failed");
                Err(e)
            }
        }
    }
}
