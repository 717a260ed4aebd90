#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI for extracting mineral resource figures from chunked report JSON.
//!
//! ```text
//! mineral_table extract report.json [--metal Cu]... [--anchor "Olympic Dam"]
//!                                   [--strict] [--config extract.toml] [--format json]
//! mineral_table texts report.json
//! ```
//!
//! Set `RUST_LOG=debug` to see how table columns were classified.

mod report;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use mineral_table_extract::config::DEFAULT_METAL;
use mineral_table_extract::records::{load_records, record_texts};
use mineral_table_extract::{ExtractConfig, RowPolicy};

#[derive(Parser)]
#[command(
    name = "mineral_table",
    about = "Extract measured and indicated resource figures from report tables"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract figures for one or more metals
    Extract {
        /// JSON file holding an array of records with a `text` field
        input: PathBuf,
        /// Metal symbol to extract (repeatable, e.g. `-m Cu -m Au`)
        #[arg(long = "metal", short = 'm')]
        metals: Vec<String>,
        /// Substring identifying the record that holds the table
        #[arg(long)]
        anchor: Option<String>,
        /// Fail when a matching row's width differs from the header
        #[arg(long)]
        strict: bool,
        /// TOML file with default anchor, row policy, and metals
        #[arg(long)]
        config: Option<PathBuf>,
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Print the text of every record
    Texts {
        /// JSON file holding an array of records with a `text` field
        input: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Extract {
            input,
            metals,
            anchor,
            strict,
            config,
            format,
        } => {
            let config = match config {
                Some(path) => ExtractConfig::load(&path)?,
                None => ExtractConfig::default(),
            };

            let mut options = config.options();
            if let Some(anchor) = anchor {
                options = options.with_anchor(&anchor);
            }
            if strict {
                options = options.with_row_policy(RowPolicy::Strict);
            }

            let mut metals = if metals.is_empty() {
                config.metals
            } else {
                metals
            };
            if metals.is_empty() {
                metals.push(DEFAULT_METAL.to_owned());
            }

            let metals = report::dedup_metals(metals);
            let records = load_records(&input)?;
            let outcomes = report::run(&records, &metals, &options);

            match format {
                Format::Text => print!("{}", report::format_text(&outcomes)),
                Format::Json => {
                    let json = report::to_json(&outcomes)?;
                    println!("{}", serde_json::to_string_pretty(&json)?);
                }
            }

            let mut failed = false;
            for outcome in &outcomes {
                if let Err(e) = &outcome.result {
                    eprintln!("Error ({}): {e}", outcome.metal);
                    failed = true;
                }
            }
            if failed {
                std::process::exit(1);
            }
        }
        Commands::Texts { input } => {
            let records = load_records(&input)?;
            let texts = record_texts(&records);

            for text in &texts {
                println!("{text}");
                println!();
            }

            log::info!("{} of {} records have text", texts.len(), records.len());
        }
    }

    Ok(())
}
