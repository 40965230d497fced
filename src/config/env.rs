//! Environment overrides
//!
//! Reads key/value pairs from a `.env` file or the process environment and
//! applies them on top of a [`Config`]. Keys are matched case-insensitively
//! with `_` ignored, so `selectedField`, `SELECTED_FIELD` and
//! `CSVALERT_SELECTED_FIELD` all name the same setting.

use crate::config::Config;
use crate::error::ConfigError;
use std::path::Path;

/// Prefix accepted in front of every key
const PREFIX: &str = "csvalert";

/// A set of recognised key/value overrides
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    pairs: Vec<(Key, String)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Key {
    SelectedField,
    Condition,
    Threshold,
    CsvPath,
    HasHeader,
}

impl Key {
    fn lookup(raw: &str) -> Option<Self> {
        let normalized: String = raw
            .chars()
            .filter(|c| *c != '_')
            .flat_map(char::to_lowercase)
            .collect();
        let normalized = normalized.strip_prefix(PREFIX).unwrap_or(normalized.as_str());

        match normalized {
            "selectedfield" => Some(Self::SelectedField),
            "condition" => Some(Self::Condition),
            "threshold" => Some(Self::Threshold),
            "csvpath" => Some(Self::CsvPath),
            "hasheader" => Some(Self::HasHeader),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::SelectedField => "selectedField",
            Self::Condition => "condition",
            Self::Threshold => "threshold",
            Self::CsvPath => "csvPath",
            Self::HasHeader => "hasHeader",
        }
    }
}

impl EnvOverrides {
    /// Collect recognised keys from arbitrary pairs, ignoring the rest
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let pairs = pairs
            .into_iter()
            .filter_map(|(k, v)| Key::lookup(k.as_ref()).map(|key| (key, v.into())))
            .collect();
        Self { pairs }
    }

    /// Read a `.env` file without touching the process environment
    pub fn from_env_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let iter = dotenvy::from_path_iter(path).map_err(|e| {
            if e.not_found() {
                ConfigError::FileNotFound(path.display().to_string())
            } else {
                ConfigError::EnvFile(e)
            }
        })?;

        let pairs = iter.collect::<Result<Vec<_>, _>>()?;
        log::info!("Loaded env file {}", path.display());
        Ok(Self::from_pairs(pairs))
    }

    /// Snapshot the process environment
    pub fn from_process_env() -> Self {
        Self::from_pairs(
            std::env::vars_os()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?))),
        )
    }

    /// Number of recognised overrides
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Apply the overrides to a configuration, later pairs winning
    pub fn apply(&self, config: &mut Config) -> Result<(), ConfigError> {
        for (key, value) in &self.pairs {
            let value = value.trim();
            match key {
                Key::SelectedField => config.rule.selected_field = Some(value.to_string()),
                Key::Condition => config.rule.condition = value.to_string(),
                Key::Threshold => {
                    config.rule.threshold = value.parse().map_err(|_| {
                        ConfigError::invalid(key.name(), format!("not a number: {}", value))
                    })?
                }
                Key::CsvPath => config.source.csv_path = Some(value.to_string()),
                Key::HasHeader => config.source.has_header = Some(parse_bool(*key, value)?),
            }
        }
        Ok(())
    }
}

fn parse_bool(key: Key, value: &str) -> Result<bool, ConfigError> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::invalid(
            key.name(),
            format!("not a boolean: {}", value),
        )),
    }
}
