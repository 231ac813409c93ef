use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use tracing::debug;

use crate::cell::Cell;
use crate::error::{TimetableError, TimetableResult};
use crate::layout::SourceLayout;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    G,
    D,
}

impl Direction {
    /// Emission order for every date.
    pub const ORDER: [Direction; 2] = [Direction::G, Direction::D];

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::G => "G",
            Direction::D => "D",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "G" => Some(Direction::G),
            "D" => Some(Direction::D),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw cells of the first worksheet: a header row followed by data rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    pub header: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SourceRow {
    pub line_id: Cell,
    pub month: u32,
    pub day_type: String,
    pub direction: String,
    pub hours: Vec<Cell>,
}

/// A loaded source timetable holding exactly one line and one month.
#[derive(Debug, Clone)]
pub struct SourceTable {
    line_id: Cell,
    month: u32,
    hour_columns: Vec<String>,
    rows: Vec<SourceRow>,
}

struct ColumnPositions {
    line: usize,
    month: usize,
    day_type: usize,
    direction: usize,
    hours: Vec<usize>,
}

impl ColumnPositions {
    fn locate(header: &[String], layout: &SourceLayout) -> TimetableResult<Self> {
        let find = |name: &str| {
            header.iter().position(|h| h == name).ok_or_else(|| {
                TimetableError::invalid_input(format!("missing required column '{name}'"))
            })
        };
        let line = find(&layout.line_column)?;
        let month = find(&layout.month_column)?;
        let day_type = find(&layout.day_type_column)?;
        let direction = find(&layout.direction_column)?;
        let keys = [line, month, day_type, direction];
        let hours = (0..header.len()).filter(|idx| !keys.contains(idx)).collect();
        Ok(Self {
            line,
            month,
            day_type,
            direction,
            hours,
        })
    }
}

impl SourceTable {
    pub fn from_grid(grid: Grid, layout: &SourceLayout) -> TimetableResult<Self> {
        let positions = ColumnPositions::locate(&grid.header, layout)?;
        let hour_columns = positions
            .hours
            .iter()
            .map(|&idx| grid.header[idx].clone())
            .collect::<Vec<_>>();

        let mut rows = Vec::with_capacity(grid.rows.len());
        for (idx, raw) in grid.rows.into_iter().enumerate() {
            if raw.iter().all(Cell::is_empty) {
                continue;
            }
            let cell = |pos: usize| raw.get(pos).cloned().unwrap_or(Cell::Empty);
            let month_cell = cell(positions.month);
            let month = month_cell
                .as_integer()
                .and_then(|m| u32::try_from(m).ok())
                .ok_or_else(|| {
                    TimetableError::invalid_input(format!(
                        "row {}: month value '{}' is not an integer",
                        idx + 2,
                        month_cell
                    ))
                })?;
            rows.push(SourceRow {
                line_id: cell(positions.line),
                month,
                day_type: cell(positions.day_type).to_string(),
                direction: cell(positions.direction).to_string(),
                hours: positions.hours.iter().map(|&pos| cell(pos)).collect(),
            });
        }

        let line_keys: BTreeSet<String> = rows.iter().map(|row| row.line_id.key()).collect();
        let months: BTreeSet<u32> = rows.iter().map(|row| row.month).collect();
        if line_keys.len() != 1 || months.len() != 1 {
            return Err(TimetableError::invalid_input(format!(
                "expected exactly one line identifier and one month, found {} line(s) and {} month(s)",
                line_keys.len(),
                months.len()
            )));
        }

        let line_id = rows[0].line_id.clone();
        let month = rows[0].month;
        debug!(
            line = %line_id,
            month,
            rows = rows.len(),
            hour_columns = hour_columns.len(),
            "loaded source timetable"
        );
        Ok(Self {
            line_id,
            month,
            hour_columns,
            rows,
        })
    }

    pub fn line_id(&self) -> &Cell {
        &self.line_id
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn rows(&self) -> &[SourceRow] {
        &self.rows
    }

    pub fn hour_columns(&self) -> &[String] {
        &self.hour_columns
    }

    /// Declared hour-column count of the source sheet.
    pub fn declared_width(&self) -> usize {
        self.hour_columns.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> Vec<String> {
        ["LineID", "Month", "DayType", "Direction", "H1", "H2"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn row(line: Cell, month: Cell) -> Vec<Cell> {
        vec![
            line,
            month,
            Cell::Text("Weekday".into()),
            Cell::Text("G".into()),
            Cell::Text("08:00".into()),
            Cell::Empty,
        ]
    }

    #[test]
    fn mixed_numeric_line_ids_count_once() {
        let grid = Grid {
            header: header(),
            rows: vec![
                row(Cell::Int(42), Cell::Int(6)),
                row(Cell::Float(42.0), Cell::Float(6.0)),
            ],
        };
        let table = SourceTable::from_grid(grid, &SourceLayout::english()).unwrap();
        assert_eq!(table.month(), 6);
        assert_eq!(table.rows().len(), 2);
        assert_eq!(table.declared_width(), 2);
    }

    #[test]
    fn blank_rows_are_skipped() {
        let grid = Grid {
            header: header(),
            rows: vec![row(Cell::Int(7), Cell::Int(1)), vec![Cell::Empty; 6]],
        };
        let table = SourceTable::from_grid(grid, &SourceLayout::english()).unwrap();
        assert_eq!(table.rows().len(), 1);
    }

    #[test]
    fn missing_key_column_is_invalid_input() {
        let grid = Grid {
            header: vec!["LineID".into(), "Month".into()],
            rows: Vec::new(),
        };
        let err = SourceTable::from_grid(grid, &SourceLayout::english()).unwrap_err();
        assert!(err.to_string().contains("DayType"));
    }

    #[test]
    fn empty_sheet_is_invalid_input() {
        let grid = Grid {
            header: header(),
            rows: Vec::new(),
        };
        assert!(matches!(
            SourceTable::from_grid(grid, &SourceLayout::english()),
            Err(TimetableError::InvalidInput(_))
        ));
    }

    #[test]
    fn non_integer_month_is_invalid_input() {
        let grid = Grid {
            header: header(),
            rows: vec![row(Cell::Int(7), Cell::Text("June".into()))],
        };
        assert!(matches!(
            SourceTable::from_grid(grid, &SourceLayout::english()),
            Err(TimetableError::InvalidInput(_))
        ));
    }
}
