mod common;

use common::*;
use std::io::{Cursor, Read};
use timetable_tool::{SourceLayout, TimetableError, Upload, process_batch};

fn uploads() -> Vec<Upload> {
    let a = vec![source_row(42, 6, "Weekday", "G", &[time(8, 0), time(9, 0)])];
    let b = vec![source_row(7, 2, "Sunday", "D", &[time(10, 0), time(12, 0)])];
    vec![
        Upload::new("A1.xlsx", source_xlsx(&ENGLISH_HEADER, &a)),
        Upload::new("B2.csv", source_csv(&ENGLISH_HEADER, &b)),
    ]
}

#[test]
fn batch_archive_holds_one_output_per_upload() {
    let archive = process_batch(&uploads(), 2025, &SourceLayout::english()).unwrap();
    let mut zip = zip::ZipArchive::new(Cursor::new(archive)).unwrap();
    assert_eq!(zip.len(), 2);

    let mut names: Vec<String> = zip.file_names().map(str::to_string).collect();
    names.sort();
    assert_eq!(names, vec!["A1_2025.xlsx", "B2_2025.csv"]);

    let mut csv = String::new();
    zip.by_name("B2_2025.csv")
        .unwrap()
        .read_to_string(&mut csv)
        .unwrap();
    // February 2025 has 28 days
    assert_eq!(csv.lines().count(), 1 + 56);
    assert!(csv.contains("7,2025-02-02,D,10:00:00,12:00:00"));
}

#[test]
fn one_bad_file_aborts_the_whole_batch() {
    let mut uploads = uploads();
    let bad = vec![
        source_row(1, 6, "Weekday", "G", &[time(8, 0)]),
        source_row(2, 6, "Weekday", "G", &[time(8, 0)]),
    ];
    uploads.insert(1, Upload::new("bad.csv", source_csv(&ENGLISH_HEADER[..5], &bad)));
    let err = process_batch(&uploads, 2025, &SourceLayout::english()).unwrap_err();
    assert!(matches!(err, TimetableError::InvalidInput(_)), "{err}");
}

#[test]
fn unsupported_extension_is_reported() {
    let mut uploads = uploads();
    uploads.push(Upload::new("legacy.xls", Vec::new()));
    let err = process_batch(&uploads, 2025, &SourceLayout::english()).unwrap_err();
    match err {
        TimetableError::UnsupportedFormat(name) => assert_eq!(name, "legacy.xls"),
        other => panic!("unexpected error {other}"),
    }
}

#[test]
fn uploads_sharing_an_output_name_are_all_archived() {
    let a = vec![source_row(42, 6, "Weekday", "G", &[time(8, 0)])];
    let b = vec![source_row(43, 6, "Sunday", "D", &[time(9, 0)])];
    let uploads = vec![
        Upload::new("x/A1.xlsx", source_xlsx(&ENGLISH_HEADER[..5], &a)),
        Upload::new("y/A1.xlsx", source_xlsx(&ENGLISH_HEADER[..5], &b)),
        Upload::new("A1.xlsx", source_xlsx(&ENGLISH_HEADER[..5], &a)),
    ];
    let archive = process_batch(&uploads, 2025, &SourceLayout::english()).unwrap();
    let zip = zip::ZipArchive::new(Cursor::new(archive)).unwrap();
    let names: Vec<&str> = zip.file_names().collect();
    assert_eq!(zip.len(), 3);
    for expected in ["A1_2025.xlsx", "A1_2025_2.xlsx", "A1_2025_3.xlsx"] {
        assert!(names.contains(&expected), "{names:?}");
    }
}
