//! CLI argument definitions for the lab-report extractor.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "labrex",
    version,
    about = "Lab report extractor - Convert lab-report PDFs to structured JSON",
    long_about = "Convert medical lab-report PDFs to structured JSON records.\n\n\
                  Text is extracted from each PDF and forwarded to an \
                  OpenAI-compatible model endpoint constrained to a fixed \
                  report schema (IKC or AKH), with a generic fallback form."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

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
    /// Parse one PDF or a directory of PDFs into structured JSON.
    Parse(ParseArgs),
}

#[derive(Parser)]
pub struct ParseArgs {
    /// Path to a PDF file or a directory containing PDFs.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Force a report schema instead of detecting it from the filename.
    #[arg(long = "report-type", short = 'r', value_enum)]
    pub report_type: Option<ReportTypeArg>,

    /// Policy when no report type can be detected from a filename.
    #[arg(long = "unknown-type", value_enum, default_value = "default-ikc")]
    pub unknown_type: UnknownTypeArg,

    /// Output directory for generated files (default: the input directory).
    #[arg(long = "output-dir", short = 'o', value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Also write the intermediate extracted text next to each JSON file.
    #[arg(long = "save-txt", short = 't')]
    pub save_txt: bool,

    /// Model name. Falls back to the MODEL_NAME environment variable.
    #[arg(long = "model-name", short = 'm', value_name = "NAME")]
    pub model_name: Option<String>,

    /// Base URL of the model endpoint. Falls back to BASE_URL.
    #[arg(long = "base-url", short = 'u', value_name = "URL")]
    pub base_url: Option<String>,

    /// API key for the model endpoint. Falls back to API_KEY.
    #[arg(long = "api-key", short = 'k', value_name = "KEY")]
    pub api_key: Option<String>,

    /// Retry budget for schema-invalid generations.
    #[arg(long = "max-attempts", value_name = "N", default_value_t = labrex_extract::DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: u32,
}

/// Selectable report schemas.
#[derive(Clone, Copy, ValueEnum)]
pub enum ReportTypeArg {
    Ikc,
    Akh,
    /// Dynamic-sections fallback for unknown panel compositions.
    Generic,
}

/// Fallback policy for filenames carrying no recognizable tag.
#[derive(Clone, Copy, ValueEnum)]
pub enum UnknownTypeArg {
    /// Assume IKC and log a warning (historical behavior).
    DefaultIkc,
    /// Treat the file as a failure.
    Fail,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
