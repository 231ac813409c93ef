use crate::cell::Cell;
use crate::error::{TimetableError, TimetableResult};
use crate::source::Grid;
use crate::table::OutputTable;

pub fn read_grid(bytes: &[u8]) -> TimetableResult<Grid> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);
    let header = reader.headers()?.iter().map(str::to_string).collect();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(Cell::from_text).collect());
    }
    Ok(Grid { header, rows })
}

pub fn write_table(table: &OutputTable) -> TimetableResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(table.headers())?;
    for record in table.text_rows() {
        writer.write_record(&record)?;
    }
    writer.flush()?;
    writer
        .into_inner()
        .map_err(|err| TimetableError::Io(err.into_error()))
}
