//! `preload save` – resolve queries and write the snapshot.

use anyhow::{Context, Result};
use preload_core::batch;
use preload_core::catalog::CatalogResolver;
use preload_core::config::PreloadConfig;
use preload_core::progress::ProgressSink;
use preload_core::query;
use preload_core::snapshot;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::cli::sink::ConsoleSink;

/// Flags for `preload save`; unset values fall back to the config file.
#[derive(Debug, Default)]
pub struct SaveOptions {
    pub queries: Vec<String>,
    pub from_file: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub catalog: Option<PathBuf>,
    pub threads: Option<usize>,
    pub latency_ms: Option<u64>,
}

/// `file_logging` tells whether tracing goes to the log file (not stderr).
pub async fn run_save(cfg: &PreloadConfig, opts: SaveOptions, file_logging: bool) -> Result<()> {
    let mut sink = ConsoleSink::new(file_logging);
    let output = save(cfg, opts, &mut sink).await?;
    tracing::debug!("snapshot saved to {}", output.display());
    Ok(())
}

/// Runs the whole save flow against `sink`; returns the snapshot path written.
pub(crate) async fn save(
    cfg: &PreloadConfig,
    opts: SaveOptions,
    sink: &mut dyn ProgressSink,
) -> Result<PathBuf> {
    let mut raw = opts.queries;
    if let Some(path) = &opts.from_file {
        raw.extend(query::read_query_file(path)?);
    }
    let queries = query::parse_queries(&raw);

    let catalog_path = opts
        .catalog
        .or_else(|| cfg.catalog.clone())
        .context("no catalog given; pass --catalog or set `catalog` in config.toml")?;
    let mut resolver = CatalogResolver::load(&catalog_path)?;
    if let Some(ms) = opts.latency_ms.or(cfg.latency_ms) {
        resolver = resolver.with_latency(Duration::from_millis(ms));
    }

    let threads = opts.threads.unwrap_or_else(|| cfg.effective_threads()).max(1);
    let output = opts.output.unwrap_or_else(|| cfg.output_path());

    let result = batch::run_batch(queries, Arc::new(resolver), threads, sink).await;
    snapshot::write_snapshot(result.items(), &output)?;
    sink.log(&saved_summary(result.len(), &output));
    Ok(output)
}

fn saved_summary(count: usize, dest: &Path) -> String {
    let noun = if count == 1 { "song" } else { "songs" };
    format!("Saved {count} {noun} to {}", dest.display())
}
