//! console-search - entity search for a cloud management console
//!
//! console-search provides:
//! - Normalization of cloud resources into uniform searchable items
//! - Case-insensitive substring matching with optional field qualifiers
//! - Grouping of hits by entity kind and exact-match product shortcuts
//! - Unified output formats (jsonl/json/md/raw/text)

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod cli;
mod core;
mod entities;
mod search;

/// Logs go to stderr so stdout stays machine-readable
fn init_logging(quiet: bool, verbose: bool) {
    let default_level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("console_search={}", default_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    init_logging(cli.quiet, cli.verbose);
    cli::run(cli)
}
