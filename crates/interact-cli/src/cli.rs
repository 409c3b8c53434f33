//! CLI argument definitions for the interaction detector.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "interact-detect",
    version,
    about = "Detect medication co-administrations and knowledge-base interactions",
    long_about = "Detect medications given together within clinical time windows and\n\
                  look up documented interactions for a medication profile.\n\n\
                  Windows: same calendar day, exactly two calendar days apart, and\n\
                  less than six hours apart."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
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

    /// Allow patient identifiers to appear in logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compute windowed combinations and profile interactions.
    Run(RunArgs),

    /// Resolve medication names against the knowledge base.
    Lookup(LookupArgs),
}

#[derive(Parser)]
pub struct RunArgs {
    /// Administration rows (delimited text) or a timeline tree (.xml).
    #[arg(long = "events", value_name = "PATH")]
    pub events: PathBuf,

    /// Medication profile, one name per line.
    #[arg(long = "profile", value_name = "PATH")]
    pub profile: PathBuf,

    /// DrugBank-style XML knowledge base.
    #[arg(long = "knowledge-base", value_name = "PATH")]
    pub knowledge_base: PathBuf,

    /// Directory for the generated files.
    #[arg(long = "output-dir", value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Field delimiter of the administration rows (a single character or "tab").
    #[arg(long = "delimiter", value_name = "CHAR", default_value = ",", value_parser = parse_delimiter)]
    pub delimiter: u8,

    /// Skip writing the timeline tree.
    #[arg(long = "no-tree")]
    pub no_tree: bool,

    /// Compute and summarise without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Also write the run summary as JSON.
    #[arg(long = "summary-json", value_name = "PATH")]
    pub summary_json: Option<PathBuf>,
}

#[derive(Parser)]
pub struct LookupArgs {
    /// Medication names to resolve.
    #[arg(value_name = "NAME", required = true)]
    pub names: Vec<String>,

    /// DrugBank-style XML knowledge base.
    #[arg(long = "knowledge-base", value_name = "PATH")]
    pub knowledge_base: PathBuf,
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

fn parse_delimiter(value: &str) -> Result<u8, String> {
    if value.eq_ignore_ascii_case("tab") || value == "\\t" {
        return Ok(b'\t');
    }
    match value.as_bytes() {
        [byte] if byte.is_ascii() => Ok(*byte),
        _ => Err(format!(
            "delimiter must be a single ASCII character, got {value:?}"
        )),
    }
}
