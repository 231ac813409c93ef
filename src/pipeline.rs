use std::path::Path;
use tracing::info;

use crate::calendar;
use crate::error::TimetableResult;
use crate::layout::SourceLayout;
use crate::source::SourceTable;
use crate::spreadsheet::SpreadsheetFormat;
use crate::synthesize::synthesize;
use crate::table::OutputTable;

/// Load a source timetable from spreadsheet bytes.
pub fn load_table(
    bytes: &[u8],
    format: SpreadsheetFormat,
    layout: &SourceLayout,
) -> TimetableResult<SourceTable> {
    let grid = format.read_grid(bytes)?;
    SourceTable::from_grid(grid, layout)
}

/// Expand a loaded timetable over every day of its month in `year`.
pub fn expand_table(
    table: &SourceTable,
    year: i32,
    layout: &SourceLayout,
) -> TimetableResult<OutputTable> {
    let dates = calendar::expand(year, table.month())?;
    let rows = synthesize(table, &dates, &layout.labels);
    OutputTable::from_rows(rows, table.declared_width())
}

/// Bytes in, bytes out: the output uses the same spreadsheet format as the
/// input. No filesystem access.
pub fn process(
    bytes: &[u8],
    format: SpreadsheetFormat,
    year: i32,
    layout: &SourceLayout,
) -> TimetableResult<Vec<u8>> {
    calendar::validate_year(year)?;
    let table = load_table(bytes, format, layout)?;
    let output = expand_table(&table, year, layout)?;
    info!(
        line = %table.line_id(),
        month = table.month(),
        year,
        rows = output.height(),
        hour_columns = output.width(),
        "expanded timetable"
    );
    format.write_table(&output)
}

/// `<stem>_<year>.<ext>` for an uploaded file name.
pub fn output_file_name(input_name: &str, year: i32) -> TimetableResult<String> {
    let format = SpreadsheetFormat::from_file_name(input_name)?;
    let stem = Path::new(input_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("timetable");
    Ok(format!("{stem}_{year}.{}", format.extension()))
}
