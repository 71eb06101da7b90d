//! Sweep summary handed to progress sinks.

/// What a run is about to do: the range, its batching and the worker count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchPlan {
    pub from: i64,
    pub to: i64,
    /// Batch size after normalization (never 0).
    pub batch_size: u32,
    pub total_batches: u64,
    /// Every batch is a single element.
    pub single_step: bool,
    /// Concurrency as configured; values <= 1 mean sequential.
    pub concurrency: u16,
}

impl BatchPlan {
    pub fn new(
        from: i64,
        to: i64,
        batch_size: u32,
        total_batches: u64,
        single_step: bool,
        concurrency: u16,
    ) -> Self {
        Self {
            from,
            to,
            batch_size: batch_size.max(1),
            total_batches,
            single_step,
            concurrency,
        }
    }

    /// True when batches are dispatched to a worker pool.
    pub fn is_concurrent(&self) -> bool {
        self.concurrency > 1
    }

    /// Effective worker count: configured concurrency clamped to the batch
    /// count. Sequential plans report one worker.
    pub fn workers(&self) -> usize {
        if !self.is_concurrent() {
            return 1;
        }
        let clamped = u64::from(self.concurrency).min(self.total_batches).max(1);
        usize::try_from(clamped).unwrap_or(usize::from(self.concurrency))
    }
}
