use std::collections::HashMap;
use tracing::debug;

use crate::calendar::{DayType, ExpandedDate};
use crate::cell::Cell;
use crate::layout::DayTypeLabels;
use crate::source::{Direction, SourceRow, SourceTable};
use crate::table::OutputRow;

/// Source rows grouped by `(day type, direction)`.
///
/// Line and month are fixed for a loaded table, so this is the whole lookup
/// key. Rows whose day-type label or direction is not recognised are never
/// matched.
pub struct ScheduleIndex<'a> {
    groups: HashMap<(DayType, Direction), Vec<&'a SourceRow>>,
}

impl<'a> ScheduleIndex<'a> {
    pub fn build(table: &'a SourceTable, labels: &DayTypeLabels) -> Self {
        let line_key = table.line_id().key();
        let mut groups: HashMap<(DayType, Direction), Vec<&'a SourceRow>> = HashMap::new();
        let mut skipped = 0usize;

        for row in table.rows() {
            if row.line_id.key() != line_key || row.month != table.month() {
                skipped += 1;
                continue;
            }
            let day_type = labels.parse(&row.day_type);
            let direction = Direction::from_label(&row.direction);
            match (day_type, direction) {
                (Some(day_type), Some(direction)) => {
                    groups.entry((day_type, direction)).or_default().push(row);
                }
                _ => skipped += 1,
            }
        }

        debug!(groups = groups.len(), skipped, "built schedule index");
        Self { groups }
    }

    pub fn rows(&self, day_type: DayType, direction: Direction) -> &[&'a SourceRow] {
        self.groups
            .get(&(day_type, direction))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Non-empty hour values of all matching rows, row by row then column by
    /// column, with date-times reduced to their time of day.
    pub fn hours(&self, day_type: DayType, direction: Direction) -> Vec<Cell> {
        self.rows(day_type, direction)
            .iter()
            .flat_map(|row| row.hours.iter())
            .filter_map(Cell::to_time_of_day)
            .collect()
    }
}

/// One unpadded output row per `(date, direction)`, dates ascending and `G`
/// before `D`. Combinations without source data get an empty hour list.
pub fn synthesize(
    table: &SourceTable,
    dates: &[ExpandedDate],
    labels: &DayTypeLabels,
) -> Vec<OutputRow> {
    let index = ScheduleIndex::build(table, labels);
    let mut rows = Vec::with_capacity(dates.len() * Direction::ORDER.len());

    for expanded in dates {
        for direction in Direction::ORDER {
            rows.push(OutputRow {
                line_id: table.line_id().clone(),
                date: expanded.date,
                direction,
                hours: index.hours(expanded.day_type, direction),
            });
        }
    }
    rows
}
