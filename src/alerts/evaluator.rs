//! Threshold evaluator
//!
//! Reads a tabular source, picks one field per row, parses it as a number and
//! raises an alert for every row that satisfies the condition.

use super::types::AlertRecord;
use crate::domain::{Condition, FieldSelector, Table};
use crate::error::{ConfigError, RowError, SourceError};
use crate::source::{read_table, CsvSource};
use serde::Serialize;
use std::io::Read;
use std::path::Path;

/// A row excluded from evaluation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowSkip {
    /// 1-based source line
    pub line: u64,
    /// Why the row was skipped
    #[serde(serialize_with = "serialize_display")]
    pub error: RowError,
}

fn serialize_display<S: serde::Serializer>(err: &RowError, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(err)
}

/// Result of one evaluation pass
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Evaluation {
    /// Alerts in source row order
    pub alerts: Vec<AlertRecord>,
    /// Rows skipped with a per-row error
    pub skipped: Vec<RowSkip>,
    /// Number of data rows seen
    pub rows_evaluated: usize,
}

impl Evaluation {
    /// Check if any alert fired
    pub fn is_firing(&self) -> bool {
        !self.alerts.is_empty()
    }
}

/// Stateless evaluator configured with a selector and a condition
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluator {
    selector: FieldSelector,
    condition: Condition,
    has_header: bool,
}

impl Evaluator {
    /// Create a new evaluator
    ///
    /// Fails if a named selector is used without a header row.
    pub fn new(
        selector: FieldSelector,
        condition: Condition,
        has_header: bool,
    ) -> Result<Self, ConfigError> {
        if selector.requires_header() && !has_header {
            return Err(ConfigError::invalid(
                "selectedField",
                format!("Field '{}' is selected by name but the source has no header", selector),
            ));
        }

        let condition = Condition::new(condition.operator, condition.threshold)?;

        Ok(Self {
            selector,
            condition,
            has_header,
        })
    }

    /// Create an evaluator, inferring the header from the selector kind
    pub fn with_inferred_header(
        selector: FieldSelector,
        condition: Condition,
    ) -> Result<Self, ConfigError> {
        let has_header = selector.requires_header();
        Self::new(selector, condition, has_header)
    }

    pub fn selector(&self) -> &FieldSelector {
        &self.selector
    }

    pub fn condition(&self) -> &Condition {
        &self.condition
    }

    pub fn has_header(&self) -> bool {
        self.has_header
    }

    /// Evaluate an already-opened stream
    pub fn evaluate<R: Read>(&self, source: R) -> Result<Evaluation, SourceError> {
        let table = read_table(source, self.has_header)?;
        Ok(self.evaluate_table(&table))
    }

    /// Open a CSV file, evaluate it, and release it
    pub fn evaluate_path<P: AsRef<Path>>(&self, path: P) -> Result<Evaluation, SourceError> {
        let mut source = CsvSource::open(path)?;
        let table = source.read_table(self.has_header)?;
        if table.is_empty() {
            log::info!("Source {} has no data rows", source.path().display());
        }
        Ok(self.evaluate_table(&table))
    }

    /// Evaluate a parsed table
    pub fn evaluate_table(&self, table: &Table) -> Evaluation {
        let resolved = self.selector.resolve(table.header.as_deref());
        let mut evaluation = Evaluation {
            rows_evaluated: table.rows.len(),
            ..Default::default()
        };

        for row in &table.rows {
            let outcome = resolved
                .cell(&self.selector, &row.cells)
                .and_then(|raw| self.parse_value(raw).map(|value| (raw, value)));

            match outcome {
                Ok((raw, value)) => {
                    if self.condition.evaluate(value) {
                        log::debug!("Line {}: {} {} matched", row.line, raw, self.condition);
                        evaluation.alerts.push(AlertRecord::firing(
                            row.line,
                            &self.selector,
                            raw,
                            value,
                            &self.condition,
                        ));
                    }
                }
                Err(error) => {
                    log::warn!("Skipping line {}: {}", row.line, error);
                    evaluation.skipped.push(RowSkip {
                        line: row.line,
                        error,
                    });
                }
            }
        }

        evaluation
    }

    fn parse_value(&self, raw: &str) -> Result<f64, RowError> {
        raw.trim().parse::<f64>().map_err(|_| RowError::ValueParse {
            selector: self.selector.to_string(),
            value: raw.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Operator;
    use crate::error::QuoteFault;
    use std::io::Write;

    fn by_index(idx: usize, op: Operator, threshold: f64) -> Evaluator {
        Evaluator::new(
            FieldSelector::Index(idx),
            Condition::new(op, threshold).unwrap(),
            false,
        )
        .unwrap()
    }

    fn raw_values(evaluation: &Evaluation) -> Vec<&str> {
        evaluation
            .alerts
            .iter()
            .map(|a| a.raw_value.as_str())
            .collect()
    }

    #[test]
    fn test_selects_rows_above_threshold_in_order() {
        let evaluator = by_index(0, Operator::GreaterThan, 10.0);
        let evaluation = evaluator.evaluate("5\n15\n25\n".as_bytes()).unwrap();

        assert_eq!(raw_values(&evaluation), vec!["15", "25"]);
        assert_eq!(evaluation.rows_evaluated, 3);
        assert!(evaluation.skipped.is_empty());
        assert_eq!(evaluation.alerts[0].line, 2);
        assert_eq!(evaluation.alerts[1].line, 3);
    }

    #[test]
    fn test_non_numeric_row_is_skipped() {
        let evaluator = by_index(0, Operator::GreaterThan, 10.0);
        let evaluation = evaluator.evaluate("abc\n20\n".as_bytes()).unwrap();

        assert_eq!(raw_values(&evaluation), vec!["20"]);
        assert_eq!(evaluation.skipped.len(), 1);
        assert_eq!(evaluation.skipped[0].line, 1);
        assert!(matches!(
            evaluation.skipped[0].error,
            RowError::ValueParse { .. }
        ));
    }

    #[test]
    fn test_empty_source() {
        let evaluator = by_index(0, Operator::GreaterThan, 10.0);
        let evaluation = evaluator.evaluate("".as_bytes()).unwrap();
        assert!(evaluation.alerts.is_empty());
        assert!(!evaluation.is_firing());
        assert_eq!(evaluation.rows_evaluated, 0);
    }

    #[test]
    fn test_header_only_source() {
        let evaluator = Evaluator::with_inferred_header(
            FieldSelector::Name("temp".to_string()),
            Condition::greater_than(10.0).unwrap(),
        )
        .unwrap();
        let evaluation = evaluator.evaluate("temp\n".as_bytes()).unwrap();
        assert!(evaluation.alerts.is_empty());
        assert!(evaluation.skipped.is_empty());
    }

    #[test]
    fn test_select_by_header_name() {
        let evaluator = Evaluator::with_inferred_header(
            FieldSelector::Name("temp".to_string()),
            Condition::greater_than(10.0).unwrap(),
        )
        .unwrap();
        assert!(evaluator.has_header());

        let evaluation = evaluator.evaluate("temp\n12\n8\n".as_bytes()).unwrap();
        assert_eq!(raw_values(&evaluation), vec!["12"]);
        assert_eq!(
            evaluation.alerts[0].message,
            "Alert condition met for temp: 12 > 10.000000"
        );
    }

    #[test]
    fn test_unknown_header_name_skips_every_row() {
        let evaluator = Evaluator::with_inferred_header(
            FieldSelector::Name("pressure".to_string()),
            Condition::greater_than(10.0).unwrap(),
        )
        .unwrap();
        let evaluation = evaluator.evaluate("temp\n12\n8\n".as_bytes()).unwrap();

        assert!(evaluation.alerts.is_empty());
        assert_eq!(evaluation.skipped.len(), 2);
        assert!(evaluation
            .skipped
            .iter()
            .all(|s| matches!(s.error, RowError::FieldResolution { .. })));
    }

    #[test]
    fn test_short_row_does_not_affect_others() {
        let evaluator = by_index(1, Operator::GreaterThan, 10.0);
        let evaluation = evaluator
            .evaluate("a,50\nb\nc,x\nd,11\ne,3\n".as_bytes())
            .unwrap();

        assert_eq!(raw_values(&evaluation), vec!["50", "11"]);
        let skipped_lines: Vec<u64> = evaluation.skipped.iter().map(|s| s.line).collect();
        assert_eq!(skipped_lines, vec![2, 3]);
    }

    #[test]
    fn test_whitespace_around_value_is_trimmed() {
        let evaluator = by_index(1, Operator::GreaterThan, 10.0);
        let evaluation = evaluator.evaluate("a, 12 \n".as_bytes()).unwrap();
        assert_eq!(evaluation.alerts.len(), 1);
        assert_eq!(evaluation.alerts[0].raw_value, " 12 ");
        assert_eq!(evaluation.alerts[0].value, 12.0);
    }

    #[test]
    fn test_other_operators() {
        let source = "5\n10\n15\n";
        let cases = [
            (Operator::LessThan, vec!["5"]),
            (Operator::GreaterOrEqual, vec!["10", "15"]),
            (Operator::LessOrEqual, vec!["5", "10"]),
            (Operator::Equal, vec!["10"]),
            (Operator::NotEqual, vec!["5", "15"]),
        ];

        for (op, expected) in cases {
            let evaluation = by_index(0, op, 10.0).evaluate(source.as_bytes()).unwrap();
            assert_eq!(raw_values(&evaluation), expected, "operator {}", op);
        }
    }

    #[test]
    fn test_idempotent() {
        let evaluator = by_index(0, Operator::GreaterThan, 1.5);
        let source = "1\n2\nx\n3\n";
        let first = evaluator.evaluate(source.as_bytes()).unwrap();
        let second = evaluator.evaluate(source.as_bytes()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_selectivity_matches_filter() {
        let values = [-3.5, 0.0, 7.25, 10.0, 10.000001, 99.0, 1e9];
        let source: String = values.iter().map(|v| format!("{}\n", v)).collect();
        let evaluation = by_index(0, Operator::GreaterThan, 10.0)
            .evaluate(source.as_bytes())
            .unwrap();

        let fired: Vec<f64> = evaluation.alerts.iter().map(|a| a.value).collect();
        let expected: Vec<f64> = values.iter().copied().filter(|v| *v > 10.0).collect();
        assert_eq!(fired, expected);
    }

    #[test]
    fn test_malformed_source_fails_whole_call() {
        let evaluator = by_index(0, Operator::GreaterThan, 10.0);
        let bytes: &[u8] = b"20\n\xff\n30\n";
        assert!(matches!(
            evaluator.evaluate(bytes),
            Err(SourceError::Parse(_))
        ));
    }

    #[test]
    fn test_unterminated_quote_fails_instead_of_dropping_rows() {
        let evaluator = by_index(0, Operator::GreaterThan, 10.0);
        let result = evaluator.evaluate("20\n\"30\n40\n50\n".as_bytes());
        assert!(matches!(
            result,
            Err(SourceError::Quote {
                fault: QuoteFault::Unterminated,
                ..
            })
        ));
    }

    #[test]
    fn test_bare_quote_fails_whole_call() {
        let evaluator = by_index(0, Operator::GreaterThan, 10.0);
        let result = evaluator.evaluate("20\n3\"0\n40\n".as_bytes());
        assert!(matches!(
            result,
            Err(SourceError::Quote {
                line: 2,
                fault: QuoteFault::Bare
            })
        ));
    }

    #[test]
    fn test_quoted_numbers_are_accepted() {
        let evaluator = by_index(1, Operator::GreaterThan, 10.0);
        let evaluation = evaluator
            .evaluate("\"a, b\",\"12\"\nc,\"9\"\n".as_bytes())
            .unwrap();
        assert_eq!(raw_values(&evaluation), vec!["12"]);
    }

    #[test]
    fn test_name_selector_requires_header() {
        let result = Evaluator::new(
            FieldSelector::Name("temp".to_string()),
            Condition::greater_than(10.0).unwrap(),
            false,
        );
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_index_selector_with_header_skips_header_row() {
        let evaluator = Evaluator::new(
            FieldSelector::Index(0),
            Condition::greater_than(10.0).unwrap(),
            true,
        )
        .unwrap();
        let evaluation = evaluator.evaluate("temp\n12\n".as_bytes()).unwrap();
        assert_eq!(evaluation.rows_evaluated, 1);
        assert!(evaluation.skipped.is_empty());
        assert_eq!(raw_values(&evaluation), vec!["12"]);
    }

    #[test]
    fn test_evaluate_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "host,temp\nalpha,81.5\nbeta,40\n").unwrap();

        let evaluator = Evaluator::with_inferred_header(
            FieldSelector::Name("temp".to_string()),
            Condition::greater_than(80.0).unwrap(),
        )
        .unwrap();
        let evaluation = evaluator.evaluate_path(file.path()).unwrap();
        assert_eq!(raw_values(&evaluation), vec!["81.5"]);
    }

    #[test]
    fn test_evaluate_missing_path() {
        let evaluator = by_index(0, Operator::GreaterThan, 10.0);
        let result = evaluator.evaluate_path("/nonexistent/path/data.csv");
        assert!(matches!(result, Err(SourceError::Open { .. })));
    }
}
