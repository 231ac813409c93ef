#![allow(dead_code)]

use chrono::{Datelike, NaiveDateTime, NaiveTime, Timelike};
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};
use timetable_tool::Cell;

pub const ENGLISH_HEADER: [&str; 6] = ["LineID", "Month", "DayType", "Direction", "Hour1", "Hour2"];
pub const REFERENCE_HEADER: [&str; 6] = ["Hat No", "Ay", "Gün Tipi", "Yön", "1", "2"];

pub fn time(h: u32, m: u32) -> Cell {
    Cell::Time(NaiveTime::from_hms_opt(h, m, 0).unwrap())
}

pub fn datetime(raw: &str) -> Cell {
    Cell::DateTime(NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S").unwrap())
}

pub fn text(s: &str) -> Cell {
    Cell::Text(s.to_string())
}

/// Source row `line, month, day_type, direction, hours...`.
pub fn source_row(line: i64, month: i64, day_type: &str, direction: &str, hours: &[Cell]) -> Vec<Cell> {
    let mut row = vec![Cell::Int(line), Cell::Int(month), text(day_type), text(direction)];
    row.extend(hours.iter().cloned());
    row
}

/// Build an in-memory workbook the way a spreadsheet user would: typed
/// numbers, real Excel times and date-times.
pub fn source_xlsx(header: &[&str], rows: &[Vec<Cell>]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let time_format = Format::new().set_num_format("hh:mm");
    let datetime_format = Format::new().set_num_format("yyyy-mm-dd hh:mm:ss");
    let worksheet = workbook.add_worksheet();
    for (col, name) in header.iter().enumerate() {
        worksheet.write_string(0, col as u16, *name).unwrap();
    }
    for (r, row) in rows.iter().enumerate() {
        let r = r as u32 + 1;
        for (c, cell) in row.iter().enumerate() {
            let c = c as u16;
            match cell {
                Cell::Empty => {}
                Cell::Text(s) => {
                    worksheet.write_string(r, c, s).unwrap();
                }
                Cell::Int(i) => {
                    worksheet.write_number(r, c, *i as f64).unwrap();
                }
                Cell::Float(f) => {
                    worksheet.write_number(r, c, *f).unwrap();
                }
                Cell::Time(t) => {
                    let value =
                        ExcelDateTime::from_hms(t.hour() as u16, t.minute() as u8, t.second())
                            .unwrap();
                    worksheet
                        .write_datetime_with_format(r, c, &value, &time_format)
                        .unwrap();
                }
                Cell::DateTime(dt) => {
                    let value = ExcelDateTime::from_ymd(
                        dt.year() as u16,
                        dt.month() as u8,
                        dt.day() as u8,
                    )
                    .unwrap()
                    .and_hms(dt.hour() as u16, dt.minute() as u8, dt.second())
                    .unwrap();
                    worksheet
                        .write_datetime_with_format(r, c, &value, &datetime_format)
                        .unwrap();
                }
                other => panic!("unsupported fixture cell {other:?}"),
            }
        }
    }
    workbook.save_to_buffer().unwrap()
}

/// Same fixture as CSV text.
pub fn source_csv(header: &[&str], rows: &[Vec<Cell>]) -> Vec<u8> {
    let mut out = header.join(",");
    out.push('\n');
    for row in rows {
        let fields: Vec<String> = row
            .iter()
            .map(|cell| match cell {
                Cell::DateTime(dt) => dt.format("%Y-%m-%dT%H:%M:%S").to_string(),
                other => other.to_string(),
            })
            .collect();
        out.push_str(&fields.join(","));
        out.push('\n');
    }
    out.into_bytes()
}
