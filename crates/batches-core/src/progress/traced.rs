//! Progress sink that emits `tracing` events instead of text.

use chrono::{DateTime, Local};
use std::time::Duration;

use crate::range::{Batch, BatchPlan};

use super::duration::pretty_duration;
use super::ProgressSink;

/// Logs run boundaries at `info` and every batch at `debug`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingProgress;

impl ProgressSink for TracingProgress {
    fn begin(&self, plan: &BatchPlan) {
        tracing::info!(
            from = plan.from,
            to = plan.to,
            total_batches = plan.total_batches,
            workers = plan.workers(),
            "batch sweep started"
        );
    }

    fn start_one(&self, _at: DateTime<Local>, batch: Batch) {
        tracing::debug!(from = batch.from, to = batch.to, "batch started");
    }

    fn finish_one(&self, _at: DateTime<Local>, batch: Batch, elapsed: Duration) {
        tracing::debug!(
            from = batch.from,
            to = batch.to,
            elapsed = pretty_duration(elapsed).trim_start(),
            "batch finished"
        );
    }

    fn end(&self, plan: &BatchPlan, elapsed: Duration) {
        tracing::info!(
            from = plan.from,
            to = plan.to,
            total_batches = plan.total_batches,
            elapsed = pretty_duration(elapsed).trim_start(),
            "batch sweep finished"
        );
    }
}
