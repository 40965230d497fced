//! Configuration builder
//!
//! Merges configuration from files, environment and CLI arguments. The first
//! error encountered is kept and returned by [`ConfigBuilder::build`].

use crate::config::{Config, ConfigFile, EnvOverrides};
use crate::error::ConfigError;
use std::path::Path;

/// Default `.env` file location
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Builder for merging configuration sources
pub struct ConfigBuilder {
    config: Config,
    error: Option<ConfigError>,
}

impl ConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: Config::default(),
            error: None,
        }
    }

    fn record(&mut self, result: Result<(), ConfigError>) {
        if let Err(e) = result {
            self.error.get_or_insert(e);
        }
    }

    /// Load configuration from a TOML file, or the default locations
    pub fn with_file(mut self, path: Option<&str>) -> Self {
        let loaded = match path {
            Some(path) => ConfigFile::load(path).map(Some),
            None => ConfigFile::load_default(),
        };

        match loaded {
            Ok(Some(cfg)) => self.config = cfg,
            Ok(None) => log::debug!("No configuration file found"),
            Err(e) => self.record(Err(e)),
        }

        self
    }

    /// Apply a `.env` file
    ///
    /// A missing default `.env` is logged and ignored; a missing explicit
    /// file is an error.
    pub fn with_env_file(mut self, path: Option<&str>) -> Self {
        let explicit = path.is_some();
        let path = path.unwrap_or(DEFAULT_ENV_FILE);

        match EnvOverrides::from_env_file(Path::new(path)) {
            Ok(overrides) => {
                let result = overrides.apply(&mut self.config);
                self.record(result);
            }
            Err(ConfigError::FileNotFound(p)) if !explicit => {
                log::info!("No env file at {}, skipping", p);
            }
            Err(e) => self.record(Err(e)),
        }

        self
    }

    /// Apply overrides from the process environment
    pub fn with_process_env(self) -> Self {
        self.with_overrides(&EnvOverrides::from_process_env())
    }

    /// Apply an explicit set of overrides
    pub fn with_overrides(mut self, overrides: &EnvOverrides) -> Self {
        if overrides.is_empty() {
            return self;
        }
        log::debug!("Applying {} environment overrides", overrides.len());
        let result = overrides.apply(&mut self.config);
        self.record(result);
        self
    }

    /// Override with CLI CSV path
    pub fn with_csv_path(mut self, path: Option<String>) -> Self {
        if let Some(p) = path {
            self.config.source.csv_path = Some(p);
        }
        self
    }

    /// Override with CLI header flag
    pub fn with_has_header(mut self, has_header: Option<bool>) -> Self {
        if let Some(h) = has_header {
            self.config.source.has_header = Some(h);
        }
        self
    }

    /// Override with CLI field selector
    pub fn with_selected_field(mut self, field: Option<String>) -> Self {
        if let Some(f) = field {
            self.config.rule.selected_field = Some(f);
        }
        self
    }

    /// Override with CLI condition
    pub fn with_condition(mut self, condition: Option<String>) -> Self {
        if let Some(c) = condition {
            self.config.rule.condition = c;
        }
        self
    }

    /// Override with CLI threshold
    pub fn with_threshold(mut self, threshold: Option<f64>) -> Self {
        if let Some(t) = threshold {
            self.config.rule.threshold = t;
        }
        self
    }

    /// Build the final configuration
    pub fn build(self) -> Result<Config, ConfigError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.config),
        }
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builder_defaults() {
        let config = ConfigBuilder::new().build().unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_builder_overrides() {
        let config = ConfigBuilder::new()
            .with_csv_path(Some("data.csv".to_string()))
            .with_selected_field(Some("temp".to_string()))
            .with_condition(Some("<".to_string()))
            .with_threshold(Some(3.5))
            .with_has_header(Some(true))
            .build()
            .unwrap();

        assert_eq!(config.csv_path().unwrap(), "data.csv");
        assert_eq!(config.rule.selected_field.as_deref(), Some("temp"));
        assert_eq!(config.rule.condition, "<");
        assert_eq!(config.rule.threshold, 3.5);
        assert_eq!(config.source.has_header, Some(true));
    }

    #[test]
    fn test_precedence_file_env_cli() {
        let mut toml_file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            toml_file,
            "[rule]\nselected_field = \"a\"\nthreshold = 1.0\ncondition = \"<\""
        )
        .unwrap();

        let mut env_file = tempfile::NamedTempFile::new().unwrap();
        writeln!(env_file, "selectedField=b\nthreshold=2").unwrap();

        let config = ConfigBuilder::new()
            .with_file(toml_file.path().to_str())
            .with_env_file(env_file.path().to_str())
            .with_overrides(&EnvOverrides::from_pairs([("THRESHOLD", "3")]))
            .with_selected_field(Some("c".to_string()))
            .build()
            .unwrap();

        assert_eq!(config.rule.condition, "<");
        assert_eq!(config.rule.threshold, 3.0);
        assert_eq!(config.rule.selected_field.as_deref(), Some("c"));
    }

    #[test]
    fn test_empty_overrides_keep_config() {
        let overrides = EnvOverrides::from_pairs(Vec::<(&str, &str)>::new());
        assert!(overrides.is_empty());

        let config = ConfigBuilder::new()
            .with_threshold(Some(4.0))
            .with_overrides(&overrides)
            .build()
            .unwrap();
        assert_eq!(config.rule.threshold, 4.0);
    }

    #[test]
    fn test_missing_explicit_env_file_is_error() {
        let result = ConfigBuilder::new()
            .with_env_file(Some("/nonexistent/.env"))
            .build();
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_missing_explicit_config_file_is_error() {
        let result = ConfigBuilder::new()
            .with_file(Some("/nonexistent/csvalert.toml"))
            .build();
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_first_error_wins() {
        let result = ConfigBuilder::new()
            .with_overrides(&EnvOverrides::from_pairs([("threshold", "x")]))
            .with_overrides(&EnvOverrides::from_pairs([("hasHeader", "maybe")]))
            .build();

        assert!(
            matches!(result, Err(ConfigError::InvalidValue { ref key, .. }) if key == "threshold")
        );
    }
}
