//! Query model exchanged with the host

use crate::alerts::{AlertRecord, AlertState, Evaluator};
use crate::config::Config;
use crate::domain::{Condition, FieldSelector, Operator};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Rule parameters carried inside a query model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleQuery {
    pub selected_field: String,
    pub condition: String,
    pub threshold: f64,
}

impl RuleQuery {
    /// Take the rule parameters from a configuration
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let selected_field = config
            .rule
            .selected_field
            .clone()
            .ok_or_else(|| ConfigError::MissingField("selectedField".to_string()))?;

        Ok(Self {
            selected_field,
            condition: config.rule.condition.clone(),
            threshold: config.rule.threshold,
        })
    }

    pub fn selector(&self) -> Result<FieldSelector, ConfigError> {
        self.selected_field.parse()
    }

    pub fn condition(&self) -> Result<Condition, ConfigError> {
        let operator: Operator = self.condition.parse()?;
        Condition::new(operator, self.threshold)
    }
}

/// Opaque JSON query model stored by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryModel {
    pub json: String,
}

impl QueryModel {
    /// Encode rule parameters
    pub fn from_rule(rule: &RuleQuery) -> Result<Self, ConfigError> {
        Ok(Self {
            json: serde_json::to_string(rule)?,
        })
    }

    /// Decode rule parameters
    pub fn rule(&self) -> Result<RuleQuery, ConfigError> {
        Ok(serde_json::from_str(&self.json)?)
    }
}

/// Data source handle passed by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSourceSettings {
    /// CSV file location
    pub csv_path: String,
    /// Header override; inferred from the selector when unset
    pub has_header: Option<bool>,
}

impl DataSourceSettings {
    pub fn new(csv_path: impl Into<String>) -> Self {
        Self {
            csv_path: csv_path.into(),
            has_header: None,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self {
            csv_path: config.csv_path()?.to_string(),
            has_header: config.source.has_header,
        })
    }

    /// Build an evaluator for a query against this source
    pub fn evaluator(&self, rule: &RuleQuery) -> Result<Evaluator, ConfigError> {
        let selector = rule.selector()?;
        let has_header = self
            .has_header
            .unwrap_or_else(|| selector.requires_header());
        Evaluator::new(selector, rule.condition()?, has_header)
    }
}

/// Result returned to the host
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueryResult {
    /// Firing alerts in source order
    pub alerts: Vec<AlertRecord>,
    /// Rows skipped because of per-row errors
    pub rows_skipped: usize,
}

impl QueryResult {
    /// Overall state: firing if any alert fired
    pub fn state(&self) -> AlertState {
        if self.alerts.is_empty() {
            AlertState::Ok
        } else {
            AlertState::Firing
        }
    }
}
