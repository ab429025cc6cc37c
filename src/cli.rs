//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

/// Enrich a list of ORCID iDs with researcher profiles and works.
///
/// Reads a CSV file with an `ORCID` column, fetches each researcher's
/// profile and works from the public ORCID registry, and writes one row
/// per (researcher, work) pair.
#[derive(Parser, Debug)]
#[command(name = "orcid-enricher")]
#[command(author, version, about)]
pub struct Args {
    /// CSV file with a column named `ORCID`
    pub input: PathBuf,

    /// Output CSV path [default: autores_enriquecidos_orcid.csv]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Identifiers processed at once (1-32) [default: 1]
    #[arg(short = 'c', long, value_parser = clap::value_parser!(u8).range(1..=32))]
    pub concurrency: Option<u8>,

    /// Registry API base URL [default: https://pub.orcid.org/v3.0]
    #[arg(long)]
    pub base_url: Option<String>,

    /// Connect timeout in seconds (1-3600) [default: none]
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub connect_timeout: Option<u64>,

    /// Whole-request timeout in seconds (1-3600) [default: none]
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub read_timeout: Option<u64>,

    /// Rows to preview on stdout after the run, 0 to disable [default: 5]
    #[arg(long)]
    pub preview: Option<usize>,

    /// Disable the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Config file to use instead of the default location
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}
