//! Reading source grids from, and writing expanded tables to, spreadsheet
//! files held in memory.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{TimetableError, TimetableResult};
use crate::source::Grid;
use crate::table::OutputTable;

pub mod delimited;
pub mod xlsx;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpreadsheetFormat {
    Xlsx,
    Csv,
}

impl SpreadsheetFormat {
    /// Detect the format from a file name's extension (case-insensitive).
    pub fn from_file_name(name: &str) -> TimetableResult<Self> {
        let extension = Path::new(name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());
        match extension.as_deref() {
            Some("xlsx") => Ok(SpreadsheetFormat::Xlsx),
            Some("csv") => Ok(SpreadsheetFormat::Csv),
            _ => Err(TimetableError::UnsupportedFormat(name.to_string())),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            SpreadsheetFormat::Xlsx => "xlsx",
            SpreadsheetFormat::Csv => "csv",
        }
    }

    pub fn read_grid(&self, bytes: &[u8]) -> TimetableResult<Grid> {
        match self {
            SpreadsheetFormat::Xlsx => xlsx::read_grid(bytes),
            SpreadsheetFormat::Csv => delimited::read_grid(bytes),
        }
    }

    pub fn write_table(&self, table: &OutputTable) -> TimetableResult<Vec<u8>> {
        match self {
            SpreadsheetFormat::Xlsx => xlsx::write_table(table),
            SpreadsheetFormat::Csv => delimited::write_table(table),
        }
    }
}
