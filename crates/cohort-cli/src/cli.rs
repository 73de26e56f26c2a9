//! CLI argument definitions for the intake pipeline.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use cohort_validate::{DEFAULT_WORKERS, VALIDATION_TIMEOUT};

#[derive(Parser)]
#[command(
    name = "cohort-intake",
    version,
    about = "Screening Cohort Intake - Unpack, group, and validate screening submissions",
    long_about = "Ingest screening submission archives and dispatch them for validation.\n\n\
                  Each ZIP archive is unpacked into a per-session workspace, its CSV files\n\
                  are grouped by category and suffix, and every complete group is handed to\n\
                  a validator (local script or HTTP service). Outcomes are aggregated per\n\
                  test case into a session report."
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

    /// Allow row-level submission values in trace logs (off by default).
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run one intake pass over the inbound directory.
    Run(RunArgs),

    /// Run intake passes on a fixed interval until interrupted.
    Watch(WatchArgs),

    /// List the recognized file categories and validator payload slots.
    Categories,
}

#[derive(Parser)]
pub struct RunArgs {
    #[command(flatten)]
    pub intake: IntakeArgs,

    /// Exit non-zero when any file group fails validation.
    ///
    /// By default a completed pass exits 0 even when individual groups
    /// fail; their outcomes are still recorded in the session reports.
    #[arg(long = "strict")]
    pub strict: bool,
}

#[derive(Parser)]
pub struct WatchArgs {
    #[command(flatten)]
    pub intake: IntakeArgs,

    /// Seconds to wait between passes.
    #[arg(long = "interval-secs", value_name = "SECS", default_value_t = 30)]
    pub interval_secs: u64,
}

#[derive(Parser)]
pub struct IntakeArgs {
    /// Directory scanned for inbound ZIP archives.
    #[arg(long = "inbound", value_name = "DIR")]
    pub inbound: PathBuf,

    /// Root directory for per-session workspaces.
    #[arg(long = "ingress", value_name = "DIR")]
    pub ingress: PathBuf,

    /// Validation engine to dispatch complete groups to.
    #[arg(long = "validator", value_enum, default_value = "process")]
    pub validator: ValidatorArg,

    /// Interpreter for the process validator.
    #[arg(long = "python", value_name = "EXE", default_value = "python3")]
    pub python: String,

    /// Validator script handed to the interpreter.
    #[arg(
        long = "script",
        value_name = "PATH",
        default_value = "validate-screening.py"
    )]
    pub script: PathBuf,

    /// Schema descriptor the script validates against.
    #[arg(
        long = "schema",
        value_name = "PATH",
        default_value = "schema-descriptor.json"
    )]
    pub schema: PathBuf,

    /// Base URL of the service validator.
    #[arg(
        long = "base-url",
        value_name = "URL",
        default_value = "http://localhost:8000"
    )]
    pub base_url: String,

    /// Endpoint path appended to the base URL.
    #[arg(long = "endpoint", value_name = "PATH", default_value = "/validate")]
    pub endpoint: String,

    /// Per-group validation timeout in seconds.
    #[arg(
        long = "timeout-secs",
        value_name = "SECS",
        default_value_t = VALIDATION_TIMEOUT.as_secs()
    )]
    pub timeout_secs: u64,

    /// Number of groups validated concurrently.
    #[arg(long = "workers", value_name = "N", default_value_t = DEFAULT_WORKERS)]
    pub workers: usize,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ValidatorArg {
    Process,
    Service,
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
