//! Hadith Reconcile
//!
//! Command-line front end for title normalization, matching and
//! reconciliation of spreadsheet exports against stored book rows.

mod report;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use hadith_titles::{
    find_match_positions, normalize_with, reconcile, ConfigError, ReconcileConfig, TitleIndex,
    TitleRecord,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "hadith-reconcile", version, about)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    /// Log more detail (repeat for trace output)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the normalized comparison key of each text
    Normalize(NormalizeArgs),
    /// List candidates whose title matches a query
    Match(MatchArgs),
    /// Reconcile a spreadsheet export against candidate rows
    Reconcile(ReconcileArgs),
    /// List candidates sharing a normalized title
    Duplicates(DuplicatesArgs),
}

#[derive(Args, Debug)]
struct NormalizeArgs {
    #[arg(value_name = "TEXT", required = true)]
    texts: Vec<String>,
}

#[derive(Args, Debug)]
struct MatchArgs {
    /// Title to look up
    query: String,

    /// Candidate rows (CSV, TSV or JSON)
    #[arg(long, value_name = "PATH")]
    candidates: String,
}

#[derive(Args, Debug)]
struct ReconcileArgs {
    /// Spreadsheet export (CSV or TSV)
    #[arg(long, value_name = "PATH")]
    sheet: String,

    /// Candidate rows (CSV, TSV or JSON)
    #[arg(long, value_name = "PATH")]
    candidates: String,
}

#[derive(Args, Debug)]
struct DuplicatesArgs {
    /// Candidate rows (CSV, TSV or JSON)
    #[arg(long, value_name = "PATH")]
    candidates: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(cli.config.as_ref())?;
    tracing::debug!("Effective configuration: {:?}", config);

    match cli.command {
        Command::Normalize(args) => {
            for text in &args.texts {
                println!("{}", normalize_with(text.as_str(), &config.normalization));
            }
        }
        Command::Match(args) => {
            let candidates = hadith_io::load_records(&args.candidates, &config.sheet)?;
            let key = normalize_with(args.query.as_str(), &config.normalization);
            let positions = if config.normalization.fold_presentation_forms {
                TitleIndex::build_with(&candidates, config.normalization)
                    .positions(&args.query)
                    .to_vec()
            } else {
                find_match_positions(&args.query, &candidates)
            };
            let output = if cli.json {
                let matches: Vec<&TitleRecord> =
                    positions.iter().map(|&p| &candidates[p]).collect();
                serde_json::to_string_pretty(&matches)?
            } else {
                report::render_matches(&args.query, &key, &positions, &candidates)
            };
            println!("{}", output);
        }
        Command::Reconcile(args) => {
            let sheet = hadith_io::load_records(&args.sheet, &config.sheet)?;
            let candidates = hadith_io::load_records(&args.candidates, &config.sheet)?;
            let result = reconcile(&sheet, &candidates, &config)?;
            let output = if cli.json {
                serde_json::to_string_pretty(&result)?
            } else {
                report::render_report(&result, &candidates)
            };
            println!("{}", output);
        }
        Command::Duplicates(args) => {
            let candidates = hadith_io::load_records(&args.candidates, &config.sheet)?;
            let index = TitleIndex::build_with(&candidates, config.normalization);
            let groups = index.duplicate_groups();
            let output = if cli.json {
                serde_json::to_string_pretty(&groups)?
            } else {
                report::render_duplicates(&groups, &candidates)
            };
            println!("{}", output);
        }
    }

    Ok(())
}

/// `RUST_LOG` wins over the verbosity flag when set
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Result<ReconcileConfig, ConfigError> {
    match path {
        Some(path) => ReconcileConfig::load(path),
        None => Ok(ReconcileConfig::default()),
    }
}
