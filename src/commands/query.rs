//! Query command implementation
//!
//! Prints the query model the plugin would hand to the host.

use crate::cli::args::OutputFormat;
use crate::cli::output::{print_output, Message};
use crate::config::Config;
use crate::error::Result;
use crate::plugin::{AlertingPlugin, CsvAlertingPlugin};

/// Execute the query command
pub fn run_query(config: &Config, format: OutputFormat) -> Result<()> {
    let plugin = CsvAlertingPlugin::new(config.clone());
    let query = plugin.new_alert_query()?;

    match format {
        OutputFormat::Json => {
            let rule = query.rule()?;
            let json = serde_json::to_string_pretty(&rule)
                .map_err(crate::error::ConfigError::from)?;
            println!("{}", json);
        }
        _ => print_output(&Message { message: query.json }, format)?,
    }

    Ok(())
}
