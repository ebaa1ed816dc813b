//! CLI module - Command-line interface definitions and handlers

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::core::model::{EntityType, SearchField};
use crate::core::render::{OutputFormat, RenderConfig};
use crate::search::SearchOptions;

/// console-search - search a cloud account inventory the way the console does.
#[derive(Parser, Debug)]
#[command(name = "console-search")]
#[command(
    author,
    version,
    about,
    long_about = r#"console-search normalizes an account inventory (linodes, volumes, buckets,
domains, images, kubernetes clusters, nodebalancers) into uniform searchable
items and matches free-text queries against them.

Output formats:
- jsonl: one JSON object per line (default)
- json: a single SearchResults object
- md: Markdown, grouped by entity
- raw: labels only
- text: grouped, colored terminal view

Examples:
    console-search search web
    console-search search tag:prod --format md
    console-search --inventory account.json search 192.0.2 --entity linodes
    console-search normalize --format json --pretty
    console-search stats
"#
)]
pub struct Cli {
    /// Inventory JSON file ("-" reads stdin).
    #[arg(
        long,
        global = true,
        env = "CONSOLE_SEARCH_INVENTORY",
        default_value = "inventory.json",
        value_name = "FILE",
        long_help = "Inventory JSON file holding the already-fetched resource lists.\n\n\
Recognised keys: buckets, domains, images, kubernetesClusters, linodes,\n\
nodebalancers, volumes, regions, searchableLinodes. Missing keys are empty.\n\
Use \"-\" to read the inventory from stdin."
    )]
    pub inventory: PathBuf,

    /// Output format (jsonl/json/md/raw/text).
    #[arg(
        long,
        global = true,
        default_value = "jsonl",
        value_name = "FORMAT",
        long_help = "Select the output format.\n\n\
Supported values:\n\
- jsonl (default)\n\
- json\n\
- md (markdown)\n\
- raw\n\
- text"
    )]
    pub format: String,

    /// Disable colored output (text format).
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (errors only on stderr).
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (debug diagnostics on stderr).
    #[arg(
        short,
        long,
        global = true,
        long_help = "Enable debug diagnostics on stderr (inventory counts, search timing).\n\n\
RUST_LOG, when set, takes precedence."
    )]
    pub verbose: bool,

    /// Pretty-print JSON/JSONL output with indentation.
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search the inventory.
    #[command(
        long_about = r#"Match QUERY against every normalized entity (case-insensitive substring)
and print the hits grouped by entity kind, plus any product shortcut whose
label equals the query exactly.

A blank query returns no results. Prefix the query with a field to restrict
matching: label:, tag:, ip:, type:.

Examples:
    console-search search web
    console-search search tag:prod
    console-search search Linodes
"#
    )]
    Search {
        /// Query words (joined with single spaces).
        #[arg(value_name = "QUERY", num_args = 0..)]
        query: Vec<String>,

        /// Fields eligible for matching (label is always included).
        #[arg(
            long,
            value_name = "FIELDS",
            value_delimiter = ',',
            long_help = "Comma-separated list of fields eligible for matching.\n\n\
Allowed values: ips, label, tags, type. Defaults to all. The label is\n\
always matched."
        )]
        fields: Vec<SearchField>,

        /// Maximum number of results.
        #[arg(long, value_name = "N")]
        limit: Option<usize>,

        /// Only show one entity kind.
        #[arg(
            long,
            value_name = "TYPE",
            long_help = "Only show hits of one entity kind (bucket, domain, image,\n\
kubernetesCluster, linode, nodebalancer, volume; plurals accepted)."
        )]
        entity: Option<EntityType>,
    },

    /// Print every normalized searchable item.
    Normalize,

    /// Print the product shortcut list.
    Products,

    /// Count searchable items per entity kind.
    Stats,
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    let format: OutputFormat = cli
        .format
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;
    let render_config = RenderConfig::with_pretty(format, cli.pretty);

    if cli.no_color {
        colored::control::set_override(false);
    }

    match cli.command {
        Commands::Search {
            query,
            fields,
            limit,
            entity,
        } => {
            let options = SearchOptions {
                fields: if fields.is_empty() {
                    SearchField::ALL.to_vec()
                } else {
                    fields
                },
                limit,
            };
            crate::search::run_search(
                &cli.inventory,
                &query.join(" "),
                &options,
                entity,
                render_config,
            )
        }

        Commands::Normalize => crate::entities::api::run_normalize(&cli.inventory, render_config),

        Commands::Products => crate::search::products::run_products(render_config),

        Commands::Stats => crate::entities::api::run_stats(&cli.inventory, render_config),
    }
}
