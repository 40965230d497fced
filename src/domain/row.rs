//! Tabular row types

use serde::Serialize;

/// One data record of the source
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    /// 1-based line number in the source
    pub line: u64,
    /// Cells in column order
    pub cells: Vec<String>,
}

impl Row {
    pub fn new(line: u64, cells: Vec<String>) -> Self {
        Self { line, cells }
    }
}

/// Parsed source: optional header plus data rows
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Table {
    pub header: Option<Vec<String>>,
    pub rows: Vec<Row>,
}

impl Table {
    /// Check if the table has no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
