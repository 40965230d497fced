//! Field selection
//!
//! A field selector names one column of a row, either by position or by
//! header name. Named selectors are resolved once against the header.

use crate::error::{ConfigError, RowError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which cell of a row to inspect
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldSelector {
    /// Zero-based column index
    Index(usize),
    /// Column name, requires a header row
    Name(String),
}

impl FieldSelector {
    /// Whether this selector needs a header row to resolve
    pub fn requires_header(&self) -> bool {
        matches!(self, Self::Name(_))
    }

    /// Resolve against the header, producing a column position
    pub fn resolve(&self, header: Option<&[String]>) -> ResolvedField {
        match self {
            Self::Index(idx) => ResolvedField::Column(*idx),
            Self::Name(name) => match header {
                Some(columns) => columns
                    .iter()
                    .position(|c| c.trim() == name.as_str())
                    .map(ResolvedField::Column)
                    .unwrap_or_else(|| {
                        ResolvedField::Unresolved(format!("column '{}' not in header", name))
                    }),
                None => ResolvedField::Unresolved("no header row".to_string()),
            },
        }
    }
}

impl fmt::Display for FieldSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(idx) => write!(f, "#{}", idx),
            Self::Name(name) => write!(f, "{}", name),
        }
    }
}

/// Parses `index:N`, `name:X`, bare digits (index) or any other text (name)
impl FromStr for FieldSelector {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if let Some(rest) = s.strip_prefix("index:") {
            let idx = rest.trim().parse().map_err(|_| {
                ConfigError::invalid("selectedField", format!("Invalid column index: {}", s))
            })?;
            return Ok(Self::Index(idx));
        }

        let name = s.strip_prefix("name:").map(str::trim).unwrap_or(s);
        if name.is_empty() {
            return Err(ConfigError::invalid(
                "selectedField",
                "Field selector must not be empty",
            ));
        }

        if s.starts_with("name:") {
            return Ok(Self::Name(name.to_string()));
        }

        match name.parse::<usize>() {
            Ok(idx) => Ok(Self::Index(idx)),
            Err(_) => Ok(Self::Name(name.to_string())),
        }
    }
}

/// Selector resolved against the header shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedField {
    /// Column position to read from each row
    Column(usize),
    /// The selector matches no column; every row is skipped
    Unresolved(String),
}

impl ResolvedField {
    /// Pick the selected cell out of a row
    pub fn cell<'a>(
        &self,
        selector: &FieldSelector,
        cells: &'a [String],
    ) -> Result<&'a str, RowError> {
        match self {
            Self::Column(idx) => cells
                .get(*idx)
                .map(String::as_str)
                .ok_or_else(|| RowError::FieldResolution {
                    selector: selector.to_string(),
                    reason: format!("index {} out of range for {} columns", idx, cells.len()),
                }),
            Self::Unresolved(reason) => Err(RowError::FieldResolution {
                selector: selector.to_string(),
                reason: reason.clone(),
            }),
        }
    }
}
