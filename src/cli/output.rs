//! Output formatting utilities
//!
//! Provides table and JSON output formatting for CLI commands.

use crate::alerts::{AlertRecord, Evaluation, RowSkip};
use crate::cli::args::OutputFormat;
use crate::config::Config;
use serde::Serialize;
use std::io::{self, Write};

/// Format and print output based on the selected format
pub fn print_output<T: Serialize + TableDisplay>(data: &T, format: OutputFormat) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match format {
        OutputFormat::Table => {
            writeln!(handle, "{}", data.to_table())?;
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string());
            writeln!(handle, "{}", json)?;
        }
        OutputFormat::Compact => {
            writeln!(handle, "{}", data.to_compact())?;
        }
    }

    Ok(())
}

/// Trait for types that can be displayed as a table
pub trait TableDisplay {
    /// Format as a table string
    fn to_table(&self) -> String;

    /// Format as a compact single line
    fn to_compact(&self) -> String {
        self.to_table().replace('\n', " | ")
    }
}

/// Evaluation report for display
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    pub source: String,
    pub condition: String,
    pub field: String,
    pub rows_evaluated: usize,
    pub alerts: Vec<AlertRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<Vec<RowSkip>>,
    pub skipped_count: usize,
}

impl EvaluationReport {
    /// Build a report, optionally carrying the skipped rows
    pub fn new(
        source: &str,
        field: String,
        condition: String,
        evaluation: Evaluation,
        show_skipped: bool,
    ) -> Self {
        let skipped_count = evaluation.skipped.len();
        Self {
            source: source.to_string(),
            condition,
            field,
            rows_evaluated: evaluation.rows_evaluated,
            alerts: evaluation.alerts,
            skipped: show_skipped.then_some(evaluation.skipped),
            skipped_count,
        }
    }
}

impl TableDisplay for EvaluationReport {
    fn to_table(&self) -> String {
        let mut output = format!(
            "Source: {}\nRule: {} {}\nRows: {} evaluated, {} skipped, {} alerts\n",
            self.source,
            self.field,
            self.condition,
            self.rows_evaluated,
            self.skipped_count,
            self.alerts.len()
        );

        for alert in &self.alerts {
            output.push_str(&format!(
                "  [{}] line {}: {}\n",
                alert.state, alert.line, alert.message
            ));
        }

        if let Some(skipped) = &self.skipped {
            for skip in skipped {
                output.push_str(&format!("  [SKIP] line {}: {}\n", skip.line, skip.error));
            }
        }

        output
    }

    fn to_compact(&self) -> String {
        let lines: Vec<String> = self.alerts.iter().map(|a| a.line.to_string()).collect();
        format!(
            "{} alerts ({} skipped) lines=[{}]",
            self.alerts.len(),
            self.skipped_count,
            lines.join(",")
        )
    }
}

/// Resolved configuration for display
#[derive(Debug, Clone, Serialize)]
pub struct ConfigSummary {
    pub csv_path: String,
    pub selected_field: String,
    pub condition: String,
    pub threshold: f64,
    pub has_header: bool,
}

impl ConfigSummary {
    pub fn from_config(config: &Config) -> crate::error::Result<Self> {
        let selector = config.selector()?;
        let condition = config.condition()?;
        Ok(Self {
            csv_path: config.csv_path()?.to_string(),
            has_header: config.has_header(&selector),
            selected_field: selector.to_string(),
            condition: condition.operator.to_string(),
            threshold: condition.threshold,
        })
    }
}

impl TableDisplay for ConfigSummary {
    fn to_table(&self) -> String {
        format!(
            "CSV Path: {}\nField: {}\nCondition: {} {}\nHeader Row: {}",
            self.csv_path,
            self.selected_field,
            self.condition,
            self.threshold,
            if self.has_header { "yes" } else { "no" }
        )
    }
}

/// Simple message output
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub message: String,
}

impl TableDisplay for Message {
    fn to_table(&self) -> String {
        self.message.clone()
    }
}
