//! Command handlers
//!
//! Each command handler orchestrates the execution of a CLI command.

pub mod check;
pub mod evaluate;
pub mod query;
pub mod run;

pub use check::run_check;
pub use evaluate::run_evaluate;
pub use query::run_query;
pub use run::run_plugin;

use crate::cli::Cli;
use crate::config::{Config, ConfigBuilder};
use crate::error::Result;

/// Resolve configuration from file, env file, process env and CLI flags
pub fn resolve_config(cli: &Cli) -> Result<Config> {
    let config = ConfigBuilder::new()
        .with_file(cli.config.as_deref())
        .with_env_file(cli.env_file.as_deref())
        .with_process_env()
        .with_csv_path(cli.csv_path.clone())
        .with_selected_field(cli.field.clone())
        .with_condition(cli.condition.clone())
        .with_threshold(cli.threshold)
        .with_has_header(cli.has_header())
        .build()?;

    log::debug!("Resolved configuration: {:?}", config);
    Ok(config)
}
