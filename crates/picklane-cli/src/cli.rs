//! CLI argument definitions for PickLane.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "picklane",
    version,
    about = "PickLane - match marketplace order lines to the production catalog",
    long_about = "Match marketplace order lines to the master catalog, assign\n\
                  pick barcodes, and split the batch into expedited and\n\
                  standard shipping lanes."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Process store order files into pick lanes.
    Process(ProcessArgs),

    /// Resolve a single SKU and title against the catalog.
    Match(MatchArgs),
}

#[derive(Parser)]
pub struct ProcessArgs {
    /// Path to the master catalog CSV.
    #[arg(value_name = "CATALOG")]
    pub catalog: PathBuf,

    /// One order CSV per store account; the file stem is the store id.
    #[arg(value_name = "ORDERS", required = true)]
    pub orders: Vec<PathBuf>,

    /// JSON file mapping store ids to barcode initials.
    #[arg(long = "store-initials", value_name = "PATH")]
    pub store_initials: Option<PathBuf>,

    /// Admit orders that already carry a shipped timestamp.
    #[arg(long = "include-dispatched")]
    pub include_dispatched: bool,

    /// Keep only orders whose ship-by deadline is today or earlier.
    #[arg(long = "urgent-only")]
    pub urgent_only: bool,

    /// Run date override (YYYY-MM-DD); defaults to today.
    #[arg(long = "run-date", value_name = "DATE")]
    pub run_date: Option<NaiveDate>,

    /// Write the full batch result as JSON to this path.
    #[arg(long = "json", value_name = "PATH")]
    pub json: Option<PathBuf>,
}

#[derive(Parser)]
pub struct MatchArgs {
    /// Path to the master catalog CSV.
    #[arg(value_name = "CATALOG")]
    pub catalog: PathBuf,

    /// Raw marketplace SKU.
    #[arg(long = "sku", default_value = "")]
    pub sku: String,

    /// Listing title.
    #[arg(long = "title", default_value = "")]
    pub title: String,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
