//! Human-readable progress lines written to any `io::Write`.

use chrono::{DateTime, Local};
use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::range::{Batch, BatchPlan};

use super::duration::pretty_duration;
use super::ProgressSink;

/// Writes timestamped progress lines such as
///
/// ```text
/// 10:42:07 [1 ~ 307] total 4 batches
/// 10:42:07 [  1 ~ 100] ...  finished in   1.2ms
/// 10:42:07 [1 ~ 307] total 4 batches, finished in   5.1ms
/// ```
///
/// Sequential runs print each batch on one line (start, then finish). Concurrent
/// runs print separate start and finish lines since batches interleave.
/// Write errors are ignored.
pub struct TextProgress<W> {
    state: Mutex<TextState<W>>,
}

struct TextState<W> {
    out: W,
    /// Column width for batch bounds.
    width: usize,
    single: bool,
    full_lines: bool,
}

impl<W: Write + Send> TextProgress<W> {
    pub fn new(out: W) -> Self {
        Self {
            state: Mutex::new(TextState {
                out,
                width: 1,
                single: false,
                full_lines: false,
            }),
        }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.state
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .out
    }

    fn lock(&self) -> MutexGuard<'_, TextState<W>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TextProgress<io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write> TextState<W> {
    fn batch_label(&self, batch: Batch) -> String {
        let w = self.width;
        if self.single {
            format!("[{:>w$}]", batch.from, w = w)
        } else {
            format!("[{:>w$} ~ {:>w$}]", batch.from, batch.to, w = w)
        }
    }

    fn print(&mut self, at: DateTime<Local>, msg: &str) {
        let _ = write!(self.out, "{} {}", at.format("%H:%M:%S"), msg);
        let _ = self.out.flush();
    }
}

impl<W: Write + Send> ProgressSink for TextProgress<W> {
    fn begin(&self, plan: &BatchPlan) {
        let mut st = self.lock();
        st.width = plan.from.to_string().len().max(plan.to.to_string().len());
        st.single = plan.single_step;
        st.full_lines = plan.is_concurrent();
        st.print(
            Local::now(),
            &format!(
                "[{} ~ {}] total {} batches\n",
                plan.from, plan.to, plan.total_batches
            ),
        );
    }

    fn start_one(&self, at: DateTime<Local>, batch: Batch) {
        let mut st = self.lock();
        let label = st.batch_label(batch);
        if st.full_lines {
            st.print(at, &format!("{} ...\n", label));
        } else {
            st.print(at, &format!("{} ... ", label));
        }
    }

    fn finish_one(&self, at: DateTime<Local>, batch: Batch, elapsed: Duration) {
        let mut st = self.lock();
        if st.full_lines {
            let label = st.batch_label(batch);
            st.print(
                at,
                &format!("{} finished in {}\n", label, pretty_duration(elapsed)),
            );
        } else {
            let _ = writeln!(st.out, " finished in {}", pretty_duration(elapsed));
            let _ = st.out.flush();
        }
    }

    fn end(&self, plan: &BatchPlan, elapsed: Duration) {
        self.lock().print(
            Local::now(),
            &format!(
                "[{} ~ {}] total {} batches, finished in {}\n",
                plan.from,
                plan.to,
                plan.total_batches,
                pretty_duration(elapsed)
            ),
        );
    }
}
