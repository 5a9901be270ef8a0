//! CLI for preload.

mod commands;
mod sink;

use anyhow::Result;
use clap::{Parser, Subcommand};
use preload_core::config;
use std::path::PathBuf;

use commands::{run_save, run_show, SaveOptions};

/// Top-level CLI for preload.
#[derive(Debug, Parser)]
#[command(name = "preload")]
#[command(about = "preload: resolve song queries to download URLs and save them", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Resolve queries and save the found items to a snapshot file.
    Save {
        /// Search queries ("Artist - Title", a title, or a track URL).
        queries: Vec<String>,

        /// Read additional queries from a file, one per line.
        #[arg(long, value_name = "PATH")]
        from_file: Option<PathBuf>,

        /// Snapshot file to write (default: `output` from config, else preload.json).
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// JSON catalog to resolve against (default: `catalog` from config).
        #[arg(long, value_name = "PATH")]
        catalog: Option<PathBuf>,

        /// Number of concurrent lookups (default: `threads` from config, else CPU count).
        #[arg(long, value_name = "N")]
        threads: Option<usize>,

        /// Delay every lookup by MS milliseconds.
        #[arg(long, value_name = "MS")]
        simulate_latency_ms: Option<u64>,
    },

    /// Print the entries of a snapshot file.
    Show {
        /// Path to the snapshot file.
        path: PathBuf,
    },
}

impl CliCommand {
    /// `file_logging` is false when logging fell back to stderr.
    pub async fn run_from_args(file_logging: bool) -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Save {
                queries,
                from_file,
                output,
                catalog,
                threads,
                simulate_latency_ms,
            } => {
                let opts = SaveOptions {
                    queries,
                    from_file,
                    output,
                    catalog,
                    threads,
                    latency_ms: simulate_latency_ms,
                };
                run_save(&cfg, opts, file_logging).await?;
            }
            CliCommand::Show { path } => run_show(&path)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
