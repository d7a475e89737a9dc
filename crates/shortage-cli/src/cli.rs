//! CLI argument definitions for the shortage ETL.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "fda-shortage-etl",
    version,
    about = "FDA drug-shortage ETL - normalize, load, and report",
    long_about = "Normalize the FDA NDC directory and drug-shortage feeds into\n\
                  relational CSV artifacts, load them into a SQLite database with\n\
                  clear-and-reload semantics, and rebuild the reporting views the\n\
                  dashboard consumes."
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
    /// Normalize the two raw JSON feeds into CSV artifacts.
    Normalize(NormalizeArgs),

    /// Load the CSV artifacts into the database.
    Load(LoadArgs),

    /// Rebuild the derived reporting views.
    Views(DatabaseArgs),

    /// Print the manufacturer impact report and headline KPIs.
    Report(ReportArgs),

    /// Run the full pipeline: normalize, load, views.
    Run(RunArgs),
}

#[derive(Args)]
pub struct NormalizeArgs {
    /// Path to the raw NDC directory JSON document.
    #[arg(value_name = "NDC_JSON")]
    pub ndc_json: PathBuf,

    /// Path to the raw drug-shortages JSON document.
    #[arg(value_name = "SHORTAGES_JSON")]
    pub shortage_json: PathBuf,

    /// Directory for the CSV artifacts.
    #[arg(long = "data-dir", value_name = "DIR", default_value = "data")]
    pub data_dir: PathBuf,

    /// Fail the whole step if either dataset cannot be normalized.
    ///
    /// By default a broken dataset is logged and skipped so the other one
    /// still produces artifacts; the outcome is reported as partial.
    #[arg(long = "strict")]
    pub strict: bool,
}

#[derive(Args)]
pub struct LoadArgs {
    /// Directory containing the four CSV artifacts.
    #[arg(long = "data-dir", value_name = "DIR", default_value = "data")]
    pub data_dir: PathBuf,

    #[command(flatten)]
    pub database: DatabaseArgs,
}

#[derive(Args)]
pub struct DatabaseArgs {
    /// SQLite database path (overrides the FDA_DB_PATH environment variable).
    #[arg(long = "database", value_name = "PATH")]
    pub database: Option<PathBuf>,
}

#[derive(Args)]
pub struct ReportArgs {
    #[command(flatten)]
    pub database: DatabaseArgs,

    /// Restrict KPIs to currently active shortages.
    #[arg(long = "current-only")]
    pub current_only: bool,

    /// Filter by manufacturer name.
    #[arg(long = "manufacturer", value_name = "NAME")]
    pub manufacturer: Option<String>,

    /// Filter by therapeutic category.
    #[arg(long = "therapeutic-category", value_name = "NAME")]
    pub therapeutic_category: Option<String>,

    /// Number of manufacturers to list.
    #[arg(long = "limit", value_name = "N", default_value_t = 25)]
    pub limit: usize,
}

#[derive(Args)]
pub struct RunArgs {
    /// Path to the raw NDC directory JSON document.
    #[arg(value_name = "NDC_JSON")]
    pub ndc_json: PathBuf,

    /// Path to the raw drug-shortages JSON document.
    #[arg(value_name = "SHORTAGES_JSON")]
    pub shortage_json: PathBuf,

    /// Directory for the intermediate CSV artifacts.
    #[arg(long = "data-dir", value_name = "DIR", default_value = "data")]
    pub data_dir: PathBuf,

    #[command(flatten)]
    pub database: DatabaseArgs,

    /// Fail the pipeline if either dataset cannot be normalized.
    #[arg(long = "strict")]
    pub strict: bool,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
