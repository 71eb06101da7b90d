//! Progress reporting around a batch sweep.
//!
//! The runner calls a `ProgressSink` once before the first batch, around every
//! batch, and once after the last batch when the whole run succeeded. Sinks are
//! best-effort: they cannot fail a run.

mod duration;
mod text;
mod traced;

use chrono::{DateTime, Local};
use std::sync::Arc;
use std::time::Duration;

use crate::range::{Batch, BatchPlan};

pub use duration::pretty_duration;
pub use text::TextProgress;
pub use traced::TracingProgress;

/// Receiver of run and per-batch timing events.
///
/// In concurrent runs `start_one`/`finish_one` are called from several worker
/// threads at once; implementations serialize their own writes.
pub trait ProgressSink: Send + Sync {
    /// Called once before any batch runs.
    fn begin(&self, plan: &BatchPlan);

    /// Called right before the work function runs for `batch`.
    fn start_one(&self, at: DateTime<Local>, batch: Batch);

    /// Called after the work function succeeded for `batch`.
    fn finish_one(&self, at: DateTime<Local>, batch: Batch, elapsed: Duration);

    /// Called once after every batch succeeded. Not called when the run fails.
    fn end(&self, plan: &BatchPlan, elapsed: Duration);
}

/// Sink used when no progress reporting was configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn begin(&self, _plan: &BatchPlan) {}
    fn start_one(&self, _at: DateTime<Local>, _batch: Batch) {}
    fn finish_one(&self, _at: DateTime<Local>, _batch: Batch, _elapsed: Duration) {}
    fn end(&self, _plan: &BatchPlan, _elapsed: Duration) {}
}

impl<T: ProgressSink + ?Sized> ProgressSink for Arc<T> {
    fn begin(&self, plan: &BatchPlan) {
        (**self).begin(plan)
    }

    fn start_one(&self, at: DateTime<Local>, batch: Batch) {
        (**self).start_one(at, batch)
    }

    fn finish_one(&self, at: DateTime<Local>, batch: Batch, elapsed: Duration) {
        (**self).finish_one(at, batch, elapsed)
    }

    fn end(&self, plan: &BatchPlan, elapsed: Duration) {
        (**self).end(plan, elapsed)
    }
}
