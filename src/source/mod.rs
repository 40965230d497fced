//! Tabular source reading
//!
//! Opens CSV files and parses an entire stream into a [`Table`] in one
//! synchronous pass. The evaluation core never opens files itself.

use crate::domain::{Row, Table};
use crate::error::{QuoteFault, SourceError};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Parse a whole CSV stream into a table
///
/// The stream is read to completion first. Rows may have different column
/// counts; a short row is a per-row problem for the evaluator, not a source
/// error. Malformed quoting, CSV or UTF-8 errors fail the whole read.
pub fn read_table<R: Read>(mut reader: R, has_header: bool) -> Result<Table, SourceError> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    check_quoting(&buf)?;

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(has_header)
        .flexible(true)
        .from_reader(buf.as_slice());

    let header = if has_header {
        Some(rdr.headers()?.iter().map(str::to_string).collect::<Vec<_>>())
    } else {
        None
    };

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        rows.push(Row::new(line, record.iter().map(str::to_string).collect()));
    }

    log::debug!(
        "Read {} rows ({} header)",
        rows.len(),
        if header.is_some() { "with" } else { "no" }
    );

    Ok(Table { header, rows })
}

/// Reject quoting the csv reader would otherwise accept silently
///
/// A field that starts with `"` must end with `"` followed by a delimiter,
/// a line end or end of input, with `""` as the only escape inside it. A
/// field that does not start with `"` must not contain one.
fn check_quoting(buf: &[u8]) -> Result<(), SourceError> {
    let mut line = 1u64;
    let mut at_field_start = true;
    let mut i = 0;

    while i < buf.len() {
        if at_field_start && buf[i] == b'"' {
            let opened_on = line;
            i += 1;
            loop {
                match buf.get(i) {
                    None => {
                        return Err(SourceError::Quote {
                            line: opened_on,
                            fault: QuoteFault::Unterminated,
                        })
                    }
                    Some(b'"') if buf.get(i + 1) == Some(&b'"') => i += 2,
                    Some(b'"') => {
                        i += 1;
                        match buf.get(i) {
                            None | Some(b',') | Some(b'\n') => break,
                            Some(b'\r') if matches!(buf.get(i + 1), None | Some(b'\n')) => break,
                            Some(_) => {
                                return Err(SourceError::Quote {
                                    line,
                                    fault: QuoteFault::Extraneous,
                                })
                            }
                        }
                    }
                    Some(b'\n') => {
                        line += 1;
                        i += 1;
                    }
                    Some(_) => i += 1,
                }
            }
            at_field_start = false;
            continue;
        }

        match buf[i] {
            b',' => at_field_start = true,
            b'\n' => {
                line += 1;
                at_field_start = true;
            }
            b'"' => {
                return Err(SourceError::Quote {
                    line,
                    fault: QuoteFault::Bare,
                })
            }
            _ => at_field_start = false,
        }
        i += 1;
    }

    Ok(())
}

/// An opened CSV file
///
/// The file handle is released when the value is dropped, on every exit path.
#[derive(Debug)]
pub struct CsvSource {
    path: PathBuf,
    file: File,
}

impl CsvSource {
    /// Open a CSV file for reading
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| SourceError::Open {
            path: path.display().to_string(),
            source,
        })?;

        log::debug!("Opened source {}", path.display());

        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    /// Path the source was opened from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole file into a table
    pub fn read_table(&mut self, has_header: bool) -> Result<Table, SourceError> {
        read_table(&mut self.file, has_header)
    }
}
