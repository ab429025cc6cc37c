//! CLI entry point for the orcid-enricher tool.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use orcid_enricher_core::{Enricher, OrcidClient, read_identifiers, write_rows};
use tracing::{debug, info, warn};

mod cli;
mod config;
mod output;
mod progress;

use cli::Args;
use progress::BarProgress;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    // Logs go to stderr; stdout carries only the preview
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!(?args, "CLI arguments parsed");
    run(&args).await
}

async fn run(args: &Args) -> Result<()> {
    let loaded = config::load_config(args.config.as_deref())?;
    if loaded.loaded_from_file
        && let Some(path) = &loaded.path
    {
        debug!(path = %path.display(), "Loaded config file");
    }
    let settings = config::resolve_settings(args, loaded.config.as_ref())?;
    debug!(?settings, "Resolved run settings");

    let column = read_identifiers(&args.input)
        .with_context(|| format!("Failed to read identifiers from '{}'", args.input.display()))?;
    info!(
        input = %args.input.display(),
        cells = column.total(),
        identifiers = column.present(),
        "Loaded identifier column"
    );

    if column.present() == 0 {
        warn!("Input has no identifiers; writing header-only output");
    }

    let client = OrcidClient::new(&settings.http)?;
    let enricher = Enricher::new(Arc::new(client), settings.concurrency)?;

    let progress = BarProgress::new(settings.show_progress, column.total());
    let outcome = enricher.run(&column, &progress).await;
    progress.finish();

    write_rows(&settings.output, &outcome.rows).with_context(|| {
        format!(
            "Failed to write enriched rows to '{}'",
            settings.output.display()
        )
    })?;

    output::print_preview(&outcome.rows, settings.preview_rows);

    info!(
        rows = outcome.stats.rows,
        identities_found = outcome.stats.identities_found,
        identities_missing = outcome.stats.identities_missing,
        without_works = outcome.stats.without_works,
        output = %settings.output.display(),
        "Enrichment complete"
    );
    Ok(())
}
