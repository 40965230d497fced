//! Comparison operator and threshold condition
//!
//! Provides the enumerated operator set and the condition applied to every row.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tolerance used by the equality operators
const EPSILON: f64 = 1e-6;

/// Comparison operator between a parsed value and the threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// `>`
    #[serde(rename = ">")]
    GreaterThan,
    /// `<`
    #[serde(rename = "<")]
    LessThan,
    /// `>=`
    #[serde(rename = ">=")]
    GreaterOrEqual,
    /// `<=`
    #[serde(rename = "<=")]
    LessOrEqual,
    /// `==` (with epsilon for floats)
    #[serde(rename = "==")]
    Equal,
    /// `!=`
    #[serde(rename = "!=")]
    NotEqual,
}

impl Operator {
    /// All supported operators
    pub const ALL: [Operator; 6] = [
        Self::GreaterThan,
        Self::LessThan,
        Self::GreaterOrEqual,
        Self::LessOrEqual,
        Self::Equal,
        Self::NotEqual,
    ];

    /// Apply the operator as `value <op> threshold`
    pub fn apply(self, value: f64, threshold: f64) -> bool {
        match self {
            Self::GreaterThan => value > threshold,
            Self::LessThan => value < threshold,
            Self::GreaterOrEqual => value >= threshold,
            Self::LessOrEqual => value <= threshold,
            Self::Equal => (value - threshold).abs() < EPSILON,
            Self::NotEqual => !Self::Equal.apply(value, threshold),
        }
    }

    /// Symbol as written in configuration
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::GreaterThan => ">",
            Self::LessThan => "<",
            Self::GreaterOrEqual => ">=",
            Self::LessOrEqual => "<=",
            Self::Equal => "==",
            Self::NotEqual => "!=",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Operator {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            ">" | "gt" => Ok(Self::GreaterThan),
            "<" | "lt" => Ok(Self::LessThan),
            ">=" | "ge" => Ok(Self::GreaterOrEqual),
            "<=" | "le" => Ok(Self::LessOrEqual),
            "==" | "=" | "eq" => Ok(Self::Equal),
            "!=" | "ne" => Ok(Self::NotEqual),
            other => Err(ConfigError::invalid(
                "condition",
                format!("Unknown comparison operator: {}", other),
            )),
        }
    }
}

/// Operator plus threshold, identical for every row
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub operator: Operator,
    pub threshold: f64,
}

impl Condition {
    /// Create a validated condition
    pub fn new(operator: Operator, threshold: f64) -> Result<Self, ConfigError> {
        if !threshold.is_finite() {
            return Err(ConfigError::invalid(
                "threshold",
                format!("Threshold must be finite, got {}", threshold),
            ));
        }
        Ok(Self {
            operator,
            threshold,
        })
    }

    /// Shorthand for a `>` condition
    pub fn greater_than(threshold: f64) -> Result<Self, ConfigError> {
        Self::new(Operator::GreaterThan, threshold)
    }

    /// Evaluate the condition against a value
    #[inline]
    pub fn evaluate(&self, value: f64) -> bool {
        self.operator.apply(value, self.threshold)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.operator, self.threshold)
    }
}
