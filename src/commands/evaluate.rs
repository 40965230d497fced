//! Evaluate command implementation
//!
//! Runs one evaluation pass and prints the report.

use crate::cli::args::{EvaluateArgs, OutputFormat};
use crate::cli::output::{print_output, EvaluationReport};
use crate::config::Config;
use crate::error::Result;

/// Execute the evaluate command, returning whether any alert fired
pub fn run_evaluate(config: &Config, args: &EvaluateArgs, format: OutputFormat) -> Result<bool> {
    let evaluator = config.evaluator()?;
    let path = config.csv_path()?;

    let evaluation = evaluator.evaluate_path(path)?;
    let firing = evaluation.is_firing();

    let report = EvaluationReport::new(
        path,
        evaluator.selector().to_string(),
        evaluator.condition().to_string(),
        evaluation,
        args.show_skipped,
    );
    print_output(&report, format)?;

    Ok(firing && args.fail_on_alert)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RuleConfig, SourceConfig};
    use crate::error::{AppError, SourceError};
    use std::io::Write;

    fn config(path: &str) -> Config {
        Config {
            source: SourceConfig {
                csv_path: Some(path.to_string()),
                has_header: None,
            },
            rule: RuleConfig {
                selected_field: Some("0".to_string()),
                condition: ">".to_string(),
                threshold: 10.0,
            },
        }
    }

    #[test]
    fn test_fail_on_alert() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "5\n15\n").unwrap();
        let config = config(file.path().to_str().unwrap());

        let args = EvaluateArgs {
            fail_on_alert: true,
            show_skipped: false,
        };
        assert!(run_evaluate(&config, &args, OutputFormat::Compact).unwrap());

        let args = EvaluateArgs {
            fail_on_alert: false,
            show_skipped: true,
        };
        assert!(!run_evaluate(&config, &args, OutputFormat::Compact).unwrap());
    }

    #[test]
    fn test_missing_source() {
        let args = EvaluateArgs {
            fail_on_alert: false,
            show_skipped: false,
        };
        let result = run_evaluate(&config("/nonexistent/data.csv"), &args, OutputFormat::Table);
        assert!(matches!(
            result,
            Err(AppError::Source(SourceError::Open { .. }))
        ));
    }
}
