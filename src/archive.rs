use std::collections::HashSet;
use std::io::{Cursor, Write};
use tracing::{debug, info, warn};
use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

use crate::error::{TimetableError, TimetableResult};
use crate::layout::SourceLayout;
use crate::pipeline::{output_file_name, process};
use crate::spreadsheet::SpreadsheetFormat;

/// One uploaded spreadsheet held in memory.
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }
}

/// Process every upload in order and package the outputs into a zip
/// archive. The first failing file aborts the whole batch. Uploads that map
/// to the same output name get `_2`, `_3`, ... before the extension.
pub fn process_batch(
    uploads: &[Upload],
    year: i32,
    layout: &SourceLayout,
) -> TimetableResult<Vec<u8>> {
    if uploads.is_empty() {
        return Err(TimetableError::invalid_input("no files were uploaded"));
    }

    let mut outputs = Vec::with_capacity(uploads.len());
    let mut taken = HashSet::new();
    for upload in uploads {
        let result = SpreadsheetFormat::from_file_name(&upload.file_name).and_then(|format| {
            let name = output_file_name(&upload.file_name, year)?;
            let bytes = process(&upload.bytes, format, year, layout)?;
            Ok((name, bytes))
        });
        match result {
            Ok((name, bytes)) => outputs.push((unique_name(name, &mut taken), bytes)),
            Err(err) => {
                warn!(file = %upload.file_name, error = %err, "aborting batch");
                return Err(err);
            }
        }
    }

    let archive = build_archive(&outputs)?;
    info!(files = outputs.len(), bytes = archive.len(), "built archive");
    Ok(archive)
}

fn unique_name(name: String, taken: &mut HashSet<String>) -> String {
    if taken.insert(name.clone()) {
        return name;
    }
    let (stem, ext) = match name.rfind('.') {
        Some(dot) => name.split_at(dot),
        None => (name.as_str(), ""),
    };
    let unique = (2..)
        .map(|n| format!("{stem}_{n}{ext}"))
        .find(|candidate| !taken.contains(candidate))
        .unwrap_or_else(|| name.clone());
    debug!(from = %name, to = %unique, "renamed duplicate archive entry");
    taken.insert(unique.clone());
    unique
}

/// Deflate-compressed zip with one entry per `(name, bytes)` pair.
pub fn build_archive(entries: &[(String, Vec<u8>)]) -> TimetableResult<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    for (name, bytes) in entries {
        zip.start_file(name.as_str(), options)?;
        zip.write_all(bytes)?;
    }
    Ok(zip.finish()?.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_batch_is_invalid_input() {
        let err = process_batch(&[], 2025, &SourceLayout::default()).unwrap_err();
        assert!(matches!(err, TimetableError::InvalidInput(_)));
    }

    #[test]
    fn unsupported_upload_aborts_batch() {
        let uploads = vec![Upload::new("notes.txt", b"hello".to_vec())];
        let err = process_batch(&uploads, 2025, &SourceLayout::default()).unwrap_err();
        assert!(matches!(err, TimetableError::UnsupportedFormat(_)));
    }

    #[test]
    fn duplicate_names_get_numbered_suffixes() {
        let mut taken = HashSet::new();
        let names: Vec<String> = ["A1_2025.xlsx", "A1_2025.xlsx", "A1_2025_2.xlsx", "A1_2025.xlsx"]
            .into_iter()
            .map(|name| unique_name(name.to_string(), &mut taken))
            .collect();
        assert_eq!(
            names,
            vec!["A1_2025.xlsx", "A1_2025_2.xlsx", "A1_2025_2_2.xlsx", "A1_2025_3.xlsx"]
        );
    }

    #[test]
    fn archive_holds_one_entry_per_output() {
        let entries = vec![
            ("a_2025.csv".to_string(), b"x".to_vec()),
            ("b_2025.csv".to_string(), b"y".to_vec()),
        ];
        let bytes = build_archive(&entries).unwrap();
        let archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let names: Vec<&str> = archive.file_names().collect();
        assert_eq!(names.len(), 2);
        assert!(names.contains(&"a_2025.csv"));
        assert!(names.contains(&"b_2025.csv"));
    }
}
