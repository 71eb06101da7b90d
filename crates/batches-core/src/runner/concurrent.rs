//! Bounded worker pool fed by a single coordinating thread.
//!
//! The coordinator (the calling thread) owns the `BatchIter` and hands batches
//! one at a time to worker threads over a rendezvous channel. A one-slot
//! outcome channel carries either the first failure or, once the queue is
//! closed and every worker has exited cleanly, a single completion signal.

use anyhow::{anyhow, Result};
use chrono::Local;
use crossbeam::channel::{self, Receiver, Sender, TryRecvError};
use crossbeam::select;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Instant;

use crate::progress::ProgressSink;
use crate::range::{Batch, BatchIter};

/// Sent on the outcome channel; at most one per run is read.
enum Signal {
    /// Queue closed and all workers exited without a failure.
    Done,
    Failed(anyhow::Error),
}

/// How the dispatch loop ended.
enum Dispatch {
    /// Every batch was handed out; the queue can be closed and drained.
    Drained,
    /// A worker failed; remaining batches are abandoned.
    Failed(anyhow::Error),
}

/// Runs all batches on `workers` threads and returns the first failure.
///
/// Returns after every worker thread has exited. Batches already handed to a
/// worker when a failure is observed still run; their results are dropped.
pub(super) fn run_concurrent<F>(
    batches: BatchIter,
    workers: usize,
    work: &F,
    sink: &dyn ProgressSink,
) -> Result<()>
where
    F: Fn(i64, i64) -> Result<()> + Sync,
{
    let workers = workers.max(1);
    let (batch_tx, batch_rx) = channel::bounded::<Batch>(0);
    let (outcome_tx, outcome_rx) = channel::bounded::<Signal>(1);
    let live = AtomicUsize::new(workers);

    thread::scope(|scope| {
        let mut handles = Vec::with_capacity(workers);
        for id in 0..workers {
            let batch_rx = batch_rx.clone();
            let outcome_tx = outcome_tx.clone();
            let live = &live;
            handles.push(scope.spawn(move || {
                work_loop(id, batch_rx, outcome_tx, live, work, sink);
            }));
        }
        // Workers hold the only remaining ends, so a dead pool shows up as a
        // disconnected channel instead of a hang.
        drop(batch_rx);
        drop(outcome_tx);

        let dispatched = dispatch(batches, &batch_tx, &outcome_rx);
        // Closing the queue lets idle workers exit.
        drop(batch_tx);

        let res = match dispatched {
            Dispatch::Failed(e) => Err(e),
            Dispatch::Drained => match outcome_rx.recv() {
                Ok(Signal::Done) => Ok(()),
                Ok(Signal::Failed(e)) => Err(e),
                Err(_) => Err(pool_lost()),
            },
        };

        let mut panicked = 0usize;
        for handle in handles {
            if handle.join().is_err() {
                panicked += 1;
            }
        }
        if panicked > 0 {
            tracing::error!(panicked, "batch worker panicked");
        }
        res
    })
}

/// Hands batches to workers until the iterator is exhausted or a failure is seen.
fn dispatch(
    batches: BatchIter,
    batch_tx: &Sender<Batch>,
    outcome_rx: &Receiver<Signal>,
) -> Dispatch {
    for batch in batches {
        // A failure already reported wins over handing out more work; the
        // blocking select below picks at random when both are ready.
        match outcome_rx.try_recv() {
            Ok(signal) => return failed(signal),
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => return Dispatch::Failed(pool_lost()),
        }

        select! {
            recv(outcome_rx) -> signal => match signal {
                Ok(signal) => return failed(signal),
                Err(_) => return Dispatch::Failed(pool_lost()),
            },
            send(batch_tx, batch) -> sent => {
                if sent.is_err() {
                    // Every worker is gone; whatever they reported explains why.
                    return match outcome_rx.recv() {
                        Ok(signal) => failed(signal),
                        Err(_) => Dispatch::Failed(pool_lost()),
                    };
                }
                tracing::trace!(from = batch.from, to = batch.to, "batch dispatched");
            },
        }
    }
    Dispatch::Drained
}

fn failed(signal: Signal) -> Dispatch {
    match signal {
        Signal::Failed(e) => Dispatch::Failed(e),
        // Completion is only signalled once the queue is closed, which happens
        // after dispatching ends.
        Signal::Done => Dispatch::Failed(anyhow!(
            "batch workers exited before all batches were dispatched"
        )),
    }
}

fn pool_lost() -> anyhow::Error {
    anyhow!("batch worker panicked")
}

fn work_loop<F>(
    id: usize,
    batch_rx: Receiver<Batch>,
    outcome_tx: Sender<Signal>,
    live: &AtomicUsize,
    work: &F,
    sink: &dyn ProgressSink,
) where
    F: Fn(i64, i64) -> Result<()>,
{
    loop {
        let Ok(batch) = batch_rx.recv() else {
            // Queue closed and empty. The last worker out reports completion;
            // a worker that failed never gets here, so completion and failure
            // are never both signalled.
            if live.fetch_sub(1, Ordering::AcqRel) == 1 {
                let _ = outcome_tx.try_send(Signal::Done);
            }
            tracing::trace!(worker = id, "batch worker exiting");
            return;
        };

        let started = Instant::now();
        sink.start_one(Local::now(), batch);
        tracing::trace!(worker = id, from = batch.from, to = batch.to, "batch started");
        if let Err(e) = work(batch.from, batch.to) {
            tracing::debug!(
                worker = id,
                from = batch.from,
                to = batch.to,
                error = %e,
                "batch failed"
            );
            // Slot already taken means an earlier failure won.
            let _ = outcome_tx.try_send(Signal::Failed(e));
            return;
        }
        sink.finish_one(Local::now(), batch, started.elapsed());
    }
}
