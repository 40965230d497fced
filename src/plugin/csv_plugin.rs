//! CSV threshold alerting plugin

use super::query::{DataSourceSettings, QueryModel, QueryResult, RuleQuery};
use super::AlertingPlugin;
use crate::config::Config;
use crate::error::Result;

/// Plugin that evaluates a CSV field against a threshold
pub struct CsvAlertingPlugin {
    config: Config,
    initialized: bool,
}

impl CsvAlertingPlugin {
    /// Create a new plugin from resolved configuration
    pub fn new(config: Config) -> Self {
        Self {
            config,
            initialized: false,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}

impl AlertingPlugin for CsvAlertingPlugin {
    fn init(&mut self) -> Result<()> {
        // Fail early on a rule that could never evaluate.
        self.config.evaluator()?;
        self.initialized = true;
        log::debug!("Plugin {} initialized", self.name());
        Ok(())
    }

    fn new_alert_query(&self) -> Result<QueryModel> {
        let rule = RuleQuery::from_config(&self.config)?;
        Ok(QueryModel::from_rule(&rule)?)
    }

    fn run_query(&self, source: &DataSourceSettings, query: &QueryModel) -> Result<QueryResult> {
        let rule = query.rule()?;
        let evaluator = source.evaluator(&rule)?;
        let evaluation = evaluator.evaluate_path(&source.csv_path)?;

        log::info!(
            "Evaluated {} rows from {}: {} alerts, {} skipped",
            evaluation.rows_evaluated,
            source.csv_path,
            evaluation.alerts.len(),
            evaluation.skipped.len()
        );

        Ok(QueryResult {
            alerts: evaluation.alerts,
            rows_skipped: evaluation.skipped.len(),
        })
    }

    fn name(&self) -> &str {
        "csv-threshold"
    }
}
