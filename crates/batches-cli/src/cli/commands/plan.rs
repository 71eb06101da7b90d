//! `batches plan` – print the batch boundaries without running anything.

use anyhow::Result;
use batches_core::BatchIter;
use std::io::{self, BufWriter, Write};

pub fn run_plan(from: i64, to: i64, batch_size: u32) -> Result<()> {
    let batches = BatchIter::new(from, to, batch_size)?;
    tracing::debug!(from, to, batch_size, total = batches.total_count(), "plan");
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    write_plan(&mut out, batches)?;
    out.flush()?;
    Ok(())
}

fn write_plan(out: &mut impl Write, batches: BatchIter) -> io::Result<()> {
    for batch in batches {
        writeln!(out, "{} {}", batch.from, batch.to)?;
    }
    Ok(())
}
