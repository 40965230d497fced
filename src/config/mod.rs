//! Configuration system
//!
//! Resolves the evaluator settings from a TOML file, a `.env` file, the
//! process environment and CLI arguments, in increasing precedence.

pub mod builder;
pub mod env;
pub mod file;

pub use builder::ConfigBuilder;
pub use env::EnvOverrides;
pub use file::ConfigFile;

use crate::alerts::Evaluator;
use crate::domain::{Condition, FieldSelector, Operator};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tabular source settings
    pub source: SourceConfig,
    /// Alert rule settings
    pub rule: RuleConfig,
}

/// Tabular source configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Path of the CSV file
    pub csv_path: Option<String>,
    /// Whether the first row is a header (inferred from the selector if unset)
    pub has_header: Option<bool>,
}

/// Alert rule configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    /// Field selector, `index:N`, `name:X`, digits or a column name
    pub selected_field: Option<String>,
    /// Comparison operator symbol
    pub condition: String,
    /// Numeric threshold
    pub threshold: f64,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            selected_field: None,
            condition: Operator::GreaterThan.symbol().to_string(),
            threshold: 0.0,
        }
    }
}

impl Config {
    /// Parse the configured field selector
    pub fn selector(&self) -> Result<FieldSelector, ConfigError> {
        self.rule
            .selected_field
            .as_deref()
            .ok_or_else(|| ConfigError::MissingField("selectedField".to_string()))?
            .parse()
    }

    /// Parse the configured condition
    pub fn condition(&self) -> Result<Condition, ConfigError> {
        let operator: Operator = self.rule.condition.parse()?;
        Condition::new(operator, self.rule.threshold)
    }

    /// Configured CSV path
    pub fn csv_path(&self) -> Result<&str, ConfigError> {
        self.source
            .csv_path
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingField("csvPath".to_string()))
    }

    /// Whether the source has a header row for the given selector
    pub fn has_header(&self, selector: &FieldSelector) -> bool {
        self.source
            .has_header
            .unwrap_or_else(|| selector.requires_header())
    }

    /// Build an evaluator from this configuration
    pub fn evaluator(&self) -> Result<Evaluator, ConfigError> {
        let selector = self.selector()?;
        let condition = self.condition()?;
        let has_header = self.has_header(&selector);
        Evaluator::new(selector, condition, has_header)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(field: &str, condition: &str, threshold: f64) -> Config {
        Config {
            source: SourceConfig {
                csv_path: Some("data.csv".to_string()),
                has_header: None,
            },
            rule: RuleConfig {
                selected_field: Some(field.to_string()),
                condition: condition.to_string(),
                threshold,
            },
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.rule.condition, ">");
        assert_eq!(config.rule.threshold, 0.0);
        assert!(config.source.csv_path.is_none());
    }

    #[test]
    fn test_missing_fields() {
        let config = Config::default();
        assert!(matches!(config.selector(), Err(ConfigError::MissingField(_))));
        assert!(matches!(config.csv_path(), Err(ConfigError::MissingField(_))));
    }

    #[test]
    fn test_header_inferred_from_selector() {
        let by_name = config("temp", ">", 10.0);
        assert!(by_name.has_header(&by_name.selector().unwrap()));

        let by_index = config("0", ">", 10.0);
        assert!(!by_index.has_header(&by_index.selector().unwrap()));

        let mut explicit = config("0", ">", 10.0);
        explicit.source.has_header = Some(true);
        assert!(explicit.has_header(&explicit.selector().unwrap()));
    }

    #[test]
    fn test_evaluator_from_config() {
        let evaluator = config("temp", ">=", 5.0).evaluator().unwrap();
        assert_eq!(evaluator.condition().operator, Operator::GreaterOrEqual);
        assert!(evaluator.has_header());
    }

    #[test]
    fn test_invalid_condition() {
        let result = config("temp", "~", 5.0).evaluator();
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_toml_roundtrip_shape() {
        let parsed: Config = toml::from_str(
            r#"
            [source]
            csv_path = "/var/data/metrics.csv"

            [rule]
            selected_field = "temp"
            threshold = 80.5
            "#,
        )
        .unwrap();

        assert_eq!(parsed.source.csv_path.as_deref(), Some("/var/data/metrics.csv"));
        assert_eq!(parsed.rule.condition, ">");
        assert_eq!(parsed.rule.threshold, 80.5);
    }
}
