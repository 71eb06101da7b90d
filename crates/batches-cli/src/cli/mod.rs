//! CLI for sweeping an integer range in batches.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use batches_core::config;

use commands::{run_config, run_plan, run_sweep, SweepArgs};

/// Top-level CLI for the batch runner.
#[derive(Debug, Parser)]
#[command(name = "batches")]
#[command(about = "Split an integer range into batches and run a command per batch", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Run a command once per batch. `{from}` and `{to}` in any argument are
    /// replaced by the batch bounds.
    Run {
        /// First element of the range (inclusive).
        #[arg(long, allow_negative_numbers = true)]
        from: i64,
        /// Last element of the range (inclusive); may be below --from.
        #[arg(long, allow_negative_numbers = true)]
        to: i64,
        /// Maximum elements per batch (default from config).
        #[arg(long, value_name = "N")]
        batch_size: Option<u32>,
        /// Run up to N batches at once (default from config; 1 = in order).
        #[arg(long, short = 'j', value_name = "N")]
        concurrency: Option<u16>,
        /// Do not print progress lines.
        #[arg(long, short)]
        quiet: bool,
        /// Command and arguments, after `--`.
        #[arg(last = true, required = true, value_name = "COMMAND")]
        command: Vec<String>,
    },

    /// Print the batches a range splits into, one `from to` pair per line.
    Plan {
        #[arg(long, allow_negative_numbers = true)]
        from: i64,
        #[arg(long, allow_negative_numbers = true)]
        to: i64,
        #[arg(long, value_name = "N")]
        batch_size: Option<u32>,
    },

    /// Show the config file path and effective settings.
    Config,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Run {
                from,
                to,
                batch_size,
                concurrency,
                quiet,
                command,
            } => {
                let args = SweepArgs {
                    from,
                    to,
                    batch_size: batch_size.unwrap_or(cfg.batch_size),
                    concurrency: concurrency.unwrap_or(cfg.concurrency),
                    progress: cfg.progress && !quiet,
                    command,
                };
                run_sweep(args).await?
            }
            CliCommand::Plan {
                from,
                to,
                batch_size,
            } => run_plan(from, to, batch_size.unwrap_or(cfg.batch_size))?,
            CliCommand::Config => run_config(&cfg)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
