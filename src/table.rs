use chrono::NaiveDate;
use polars::prelude::*;

use crate::cell::Cell;
use crate::error::{TimetableError, TimetableResult};
use crate::source::Direction;

pub const LINE_HEADER: &str = "LineID";
pub const DATE_HEADER: &str = "Date";
pub const DIRECTION_HEADER: &str = "Direction";
pub const HOUR_HEADER_PREFIX: &str = "Hour";

#[derive(Debug, Clone, PartialEq)]
pub struct OutputRow {
    pub line_id: Cell,
    pub date: NaiveDate,
    pub direction: Direction,
    pub hours: Vec<Cell>,
}

impl OutputRow {
    pub fn date_string(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// Expanded timetable where every row carries exactly `width` hour cells.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputTable {
    rows: Vec<OutputRow>,
    width: usize,
}

impl OutputTable {
    /// Pad every row to `max(declared_width, longest hour list)` with empty
    /// cells. Needs the complete row set, so it runs after synthesis.
    pub fn from_rows(mut rows: Vec<OutputRow>, declared_width: usize) -> TimetableResult<Self> {
        if rows.is_empty() {
            return Err(TimetableError::EmptyResult);
        }
        let width = rows
            .iter()
            .map(|row| row.hours.len())
            .max()
            .unwrap_or(0)
            .max(declared_width);
        for row in &mut rows {
            row.hours.resize(width, Cell::Empty);
        }
        Ok(Self { rows, width })
    }

    pub fn rows(&self) -> &[OutputRow] {
        &self.rows
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn headers(&self) -> Vec<String> {
        let mut headers = vec![
            LINE_HEADER.to_string(),
            DATE_HEADER.to_string(),
            DIRECTION_HEADER.to_string(),
        ];
        headers.extend((1..=self.width).map(|n| format!("{HOUR_HEADER_PREFIX}{n}")));
        headers
    }

    /// Text rendering of every cell, header order, padding as `""`.
    pub fn text_rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| {
                let mut record = Vec::with_capacity(3 + self.width);
                record.push(row.line_id.to_string());
                record.push(row.date_string());
                record.push(row.direction.to_string());
                record.extend(row.hours.iter().map(ToString::to_string));
                record
            })
            .collect()
    }

    /// All-string frame with the output headers, used for previews.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let headers = self.headers();
        let records = self.text_rows();
        let columns = headers
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let values: Vec<&str> = records.iter().map(|r| r[idx].as_str()).collect();
                Series::new(PlSmallStr::from(name.as_str()), values).into_column()
            })
            .collect::<Vec<Column>>();
        DataFrame::new(columns)
    }
}
