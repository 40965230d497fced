//! Alert record types
//!
//! Defines the alert state and the record produced for each matching row.

use crate::domain::{Condition, FieldSelector, Operator};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Alert state reported to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertState {
    /// Condition met
    Firing,
    /// Condition not met
    Ok,
}

impl fmt::Display for AlertState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Firing => write!(f, "FIRING"),
            Self::Ok => write!(f, "OK"),
        }
    }
}

/// One row that satisfied the condition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRecord {
    /// Alert state
    pub state: AlertState,
    /// Human-readable message
    pub message: String,
    /// 1-based source line of the row
    pub line: u64,
    /// Selector that picked the field
    pub field: FieldSelector,
    /// Raw cell text
    pub raw_value: String,
    /// Parsed cell value
    pub value: f64,
    /// Operator applied
    pub operator: Operator,
    /// Threshold compared against
    pub threshold: f64,
}

impl AlertRecord {
    /// Create a firing alert for a matching row
    pub fn firing(
        line: u64,
        field: &FieldSelector,
        raw_value: &str,
        value: f64,
        condition: &Condition,
    ) -> Self {
        let message = format!(
            "Alert condition met for {}: {} {} {:.6}",
            field, raw_value, condition.operator, condition.threshold
        );

        Self {
            state: AlertState::Firing,
            message,
            line,
            field: field.clone(),
            raw_value: raw_value.to_string(),
            value,
            operator: condition.operator,
            threshold: condition.threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_firing_message() {
        let field = FieldSelector::Name("temp".to_string());
        let cond = Condition::greater_than(10.0).unwrap();
        let alert = AlertRecord::firing(3, &field, "12", 12.0, &cond);

        assert_eq!(alert.state, AlertState::Firing);
        assert_eq!(alert.message, "Alert condition met for temp: 12 > 10.000000");
        assert_eq!(alert.line, 3);
        assert_eq!(alert.value, 12.0);
    }

    #[test]
    fn test_state_display_and_serde() {
        assert_eq!(AlertState::Firing.to_string(), "FIRING");
        assert_eq!(serde_json::to_string(&AlertState::Ok).unwrap(), "\"ok\"");
    }
}
