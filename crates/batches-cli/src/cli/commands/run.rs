//! `batches run` – run an external command once per batch.

use anyhow::{bail, Context, Result};
use batches_core::{Batches, TextProgress, TracingProgress};
use std::process::Command;

/// Resolved options for one sweep (flags merged over config).
#[derive(Debug, Clone)]
pub struct SweepArgs {
    pub from: i64,
    pub to: i64,
    pub batch_size: u32,
    pub concurrency: u16,
    pub progress: bool,
    /// Program followed by its arguments; may contain `{from}` / `{to}`.
    pub command: Vec<String>,
}

pub async fn run_sweep(args: SweepArgs) -> Result<()> {
    tracing::info!(
        from = args.from,
        to = args.to,
        batch_size = args.batch_size,
        concurrency = args.concurrency,
        "starting sweep: {}",
        args.command.join(" ")
    );
    tokio::task::spawn_blocking(move || sweep(&args))
        .await
        .context("sweep task join")?
}

fn sweep(args: &SweepArgs) -> Result<()> {
    let template = args.command.as_slice();
    let batches = Batches::new(args.from, args.to, |from, to| {
        run_command(template, from, to)
    })
    .batch_size(args.batch_size)
    .concurrency(args.concurrency);

    // Quiet runs still leave per-batch timing in the log.
    if args.progress {
        batches.progress(TextProgress::stderr()).run()
    } else {
        batches.progress(TracingProgress).run()
    }
}

/// Runs the command for one batch; a non-zero exit status is a failure.
fn run_command(template: &[String], from: i64, to: i64) -> Result<()> {
    let mut argv = template.iter().map(|arg| expand(arg, from, to));
    let Some(program) = argv.next() else {
        bail!("no command given");
    };
    let status = Command::new(&program)
        .args(argv)
        .env("BATCH_FROM", from.to_string())
        .env("BATCH_TO", to.to_string())
        .status()
        .with_context(|| format!("spawn `{}`", program))?;
    if !status.success() {
        bail!("`{}` failed for batch [{} ~ {}]: {}", program, from, to, status);
    }
    Ok(())
}

/// Substitutes `{from}` and `{to}` placeholders.
fn expand(arg: &str, from: i64, to: i64) -> String {
    arg.replace("{from}", &from.to_string())
        .replace("{to}", &to.to_string())
}
