//! CLI argument definitions using clap derive
//!
//! Defines all command-line arguments and subcommands.

use clap::{ArgAction, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// Threshold alerting on a CSV field
///
/// Evaluate one column of a CSV file against a numeric condition and raise
/// an alert for every matching row.
#[derive(Parser, Debug)]
#[command(name = "csvalert")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Path to TOML configuration file
    #[arg(short, long, global = true, env = "CSVALERT_CONFIG")]
    pub config: Option<String>,

    /// Path to .env file (default: ./.env)
    #[arg(long, global = true, env = "CSVALERT_ENV_FILE")]
    pub env_file: Option<String>,

    /// CSV file to evaluate
    #[arg(long, global = true)]
    pub csv_path: Option<String>,

    /// Field to inspect: column index, header name, `index:N` or `name:X`
    #[arg(short, long, global = true)]
    pub field: Option<String>,

    /// Comparison operator (>, <, >=, <=, ==, !=)
    #[arg(long, global = true)]
    pub condition: Option<String>,

    /// Numeric threshold
    #[arg(short, long, global = true, allow_negative_numbers = true)]
    pub threshold: Option<f64>,

    /// Treat the first row as a header
    #[arg(long, global = true, action = ArgAction::SetTrue, overrides_with = "no_header")]
    pub header: bool,

    /// Treat the first row as data
    #[arg(long, global = true, action = ArgAction::SetTrue, overrides_with = "header")]
    pub no_header: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Header override from `--header` / `--no-header`
    pub fn has_header(&self) -> Option<bool> {
        match (self.header, self.no_header) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate the CSV file once and print the report
    Evaluate(EvaluateArgs),

    /// Print the query model the plugin hands to the host
    Query,

    /// Validate the resolved configuration
    Check,

    /// Register the plugin with the host and run one query
    Run(RunArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments for the evaluate command
#[derive(Parser, Debug)]
pub struct EvaluateArgs {
    /// Exit with a non-zero status when any alert fires
    #[arg(long)]
    pub fail_on_alert: bool,

    /// Also list skipped rows
    #[arg(long)]
    pub show_skipped: bool,
}

/// Arguments for the run command
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Print alert notifications to stdout instead of stderr
    #[arg(long)]
    pub stdout: bool,

    /// Disable colored alert notifications
    #[arg(long)]
    pub no_color: bool,
}

/// Output format
#[derive(ValueEnum, Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format for machine parsing
    Json,
    /// Compact single-line format
    Compact,
}

/// Generate shell completions and print to stdout
pub fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
}
