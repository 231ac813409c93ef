use calamine::{Data, ExcelDateTime as CalamineDateTime, Reader, Xlsx};
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use rust_xlsxwriter::{DocProperties, ExcelDateTime, Format, Workbook, Worksheet};
use std::io::Cursor;

use crate::cell::Cell;
use crate::error::{TimetableError, TimetableResult};
use crate::source::Grid;
use crate::table::OutputTable;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Read the first worksheet; its first row is the header.
pub fn read_grid(bytes: &[u8]) -> TimetableResult<Grid> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| TimetableError::invalid_input("workbook contains no sheets"))??;

    let mut rows = range.rows();
    let header = rows
        .next()
        .map(|cells| cells.iter().map(|c| cell_from_data(c).to_string()).collect())
        .unwrap_or_default();
    let rows = rows
        .map(|cells| cells.iter().map(cell_from_data).collect())
        .collect();
    Ok(Grid { header, rows })
}

fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(f) => Cell::Float(*f),
        Data::Int(i) => Cell::Int(*i),
        Data::Bool(b) => Cell::Bool(*b),
        Data::Error(e) => Cell::Text(e.to_string()),
        Data::DateTime(dt) => cell_from_excel_datetime(dt),
        Data::DateTimeIso(s) => match Cell::parse_datetime(s) {
            Some(dt) => Cell::DateTime(dt),
            None => Cell::from_text(s),
        },
        Data::DurationIso(s) => Cell::Text(s.clone()),
    }
}

/// Serials below one day are time-only cells; anything else, date-only
/// cells included, is a date-time.
fn cell_from_excel_datetime(dt: &CalamineDateTime) -> Cell {
    let serial = dt.as_f64();
    let Some(time) = time_from_serial(serial) else {
        return Cell::Float(serial);
    };
    if (0.0..1.0).contains(&serial) {
        return Cell::Time(time);
    }
    match dt.as_datetime() {
        Some(datetime) => Cell::DateTime(NaiveDateTime::new(datetime.date(), time)),
        None => Cell::Float(serial),
    }
}

fn time_from_serial(serial: f64) -> Option<NaiveTime> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    let seconds = (serial.fract() * SECONDS_PER_DAY).round() as u32 % 86_400;
    NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0)
}

struct CellFormats {
    time: Format,
    datetime: Format,
}

impl CellFormats {
    fn new() -> Self {
        Self {
            time: Format::new().set_num_format("hh:mm:ss"),
            datetime: Format::new().set_num_format("yyyy-mm-dd hh:mm:ss"),
        }
    }
}

pub fn write_table(table: &OutputTable) -> TimetableResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    // Fixed creation time keeps identical inputs byte-identical.
    let created = ExcelDateTime::from_ymd(2000, 1, 1)?;
    workbook.set_properties(&DocProperties::new().set_creation_datetime(&created));
    let formats = CellFormats::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Sheet1")?;

    for (col, header) in table.headers().iter().enumerate() {
        worksheet.write_string(0, col as u16, header)?;
    }

    for (idx, row) in table.rows().iter().enumerate() {
        let r = idx as u32 + 1;
        write_cell(worksheet, r, 0, &row.line_id, &formats)?;
        worksheet.write_string(r, 1, row.date_string())?;
        worksheet.write_string(r, 2, row.direction.as_str())?;
        for (offset, cell) in row.hours.iter().enumerate() {
            write_cell(worksheet, r, 3 + offset as u16, cell, &formats)?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &Cell,
    formats: &CellFormats,
) -> TimetableResult<()> {
    match cell {
        Cell::Empty => {}
        Cell::Text(s) => {
            worksheet.write_string(row, col, s)?;
        }
        Cell::Int(i) => {
            worksheet.write_number(row, col, *i as f64)?;
        }
        Cell::Float(f) => {
            worksheet.write_number(row, col, *f)?;
        }
        Cell::Bool(b) => {
            worksheet.write_boolean(row, col, *b)?;
        }
        Cell::Time(t) => {
            let value = excel_time(t)?;
            worksheet.write_datetime_with_format(row, col, &value, &formats.time)?;
        }
        Cell::DateTime(dt) => {
            let t = dt.time();
            let value =
                excel_date(&dt.date())?.and_hms(t.hour() as u16, t.minute() as u8, t.second())?;
            worksheet.write_datetime_with_format(row, col, &value, &formats.datetime)?;
        }
    }
    Ok(())
}

fn excel_time(t: &NaiveTime) -> TimetableResult<ExcelDateTime> {
    Ok(ExcelDateTime::from_hms(
        t.hour() as u16,
        t.minute() as u8,
        t.second(),
    )?)
}

fn excel_date(d: &NaiveDate) -> TimetableResult<ExcelDateTime> {
    Ok(ExcelDateTime::from_ymd(
        d.year() as u16,
        d.month() as u8,
        d.day() as u8,
    )?)
}
