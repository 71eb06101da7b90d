//! Progress sink that records every event for assertions.

use batches_core::progress::ProgressSink;
use batches_core::{Batch, BatchPlan};
use chrono::{DateTime, Local};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Begin { total_batches: u64, workers: usize },
    Start(Batch),
    Finish(Batch),
    End { total_batches: u64 },
}

#[derive(Default)]
pub struct Recorder {
    events: Mutex<Vec<Event>>,
}

impl Recorder {
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn finished(&self) -> Vec<Batch> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Finish(b) => Some(b),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

impl ProgressSink for Recorder {
    fn begin(&self, plan: &BatchPlan) {
        self.push(Event::Begin {
            total_batches: plan.total_batches,
            workers: plan.workers(),
        });
    }

    fn start_one(&self, _at: DateTime<Local>, batch: Batch) {
        self.push(Event::Start(batch));
    }

    fn finish_one(&self, _at: DateTime<Local>, batch: Batch, _elapsed: Duration) {
        self.push(Event::Finish(batch));
    }

    fn end(&self, plan: &BatchPlan, _elapsed: Duration) {
        self.push(Event::End {
            total_batches: plan.total_batches,
        });
    }
}
