//! Check command implementation
//!
//! Validates the resolved configuration without reading the source.

use crate::cli::args::OutputFormat;
use crate::cli::output::{print_output, ConfigSummary};
use crate::config::Config;
use crate::error::Result;

/// Execute the check command
pub fn run_check(config: &Config, format: OutputFormat) -> Result<()> {
    // Constructing the evaluator runs every validation the plugin would.
    config.evaluator()?;
    let summary = ConfigSummary::from_config(config)?;

    print_output(&summary, format)?;

    if !std::path::Path::new(&summary.csv_path).exists() {
        log::warn!("CSV file {} does not exist yet", summary.csv_path);
    }

    Ok(())
}
