//! csvalert - threshold alerting on a CSV field
//!
//! A command-line front end for evaluating a CSV column against a numeric
//! condition and running the alerting plugin once.

use clap::Parser;
use csvalert::cli::args::{generate_completions, Cli, Commands};
use csvalert::commands::{resolve_config, run_check, run_evaluate, run_plugin, run_query};
use csvalert::error::{AppError, ConfigError, SourceError};

/// Exit status when `--fail-on-alert` is set and alerts fired
const EXIT_ALERTING: i32 = 2;

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Set log level based on verbose flag
    if cli.verbose {
        log::set_max_level(log::LevelFilter::Debug);
    }

    match run(&cli) {
        Ok(true) => std::process::exit(EXIT_ALERTING),
        Ok(false) => {}
        Err(e) => {
            log::error!("{}", e);
            print_error(&e);
            std::process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> Result<bool, AppError> {
    if let Commands::Completions { shell } = &cli.command {
        generate_completions(*shell);
        return Ok(false);
    }

    let config = resolve_config(cli)?;

    match &cli.command {
        Commands::Evaluate(args) => run_evaluate(&config, args, cli.format),

        Commands::Query => run_query(&config, cli.format).map(|()| false),

        Commands::Check => run_check(&config, cli.format).map(|()| false),

        Commands::Run(args) => run_plugin(&config, args, cli.format).map(|()| false),

        Commands::Completions { .. } => Ok(false),
    }
}

fn print_error(err: &AppError) {
    eprintln!("Error: {}", err);

    // Print helpful hints for common errors
    match err {
        AppError::Source(SourceError::Open { .. }) => {
            eprintln!();
            eprintln!("Hint: Check the csvPath setting or pass --csv-path.");
        }
        AppError::Config(ConfigError::MissingField(field)) => {
            eprintln!();
            eprintln!(
                "Hint: Set '{}' in .env, the environment, csvalert.toml, or via CLI flags.",
                field
            );
        }
        AppError::Config(ConfigError::InvalidValue { key, .. }) if key == "condition" => {
            eprintln!();
            eprintln!("Hint: Supported operators are >, <, >=, <=, ==, !=.");
        }
        _ => {}
    }
}
