//! Error handling tests

use super::default_processor;
use crate::error::VerifierError;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_nonexistent_report_path() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing.txt");

    match default_processor().process_path(&missing).unwrap_err() {
        VerifierError::ReportNotFound { path } => assert_eq!(path, missing),
        other => panic!("Expected ReportNotFound error, got {:?}", other),
    }
}

#[test]
fn test_corrupt_pdf_returns_error_not_records() {
    let result = default_processor().process(b"not a pdf document", "report.pdf");
    assert!(matches!(result, Err(VerifierError::Pdf(_))));
}

#[test]
fn test_corrupt_workbook_returns_error() {
    let result = default_processor().process(b"CAN Bus Test Failed", "report.xlsx");
    assert!(result.is_err());
}

#[test]
fn test_binary_text_is_decoded_permissively() {
    let mut bytes = vec![0xff, 0xfe, 0x00, b'\n'];
    bytes.extend_from_slice(b"CAN Bus Test Failed\n");
    bytes.extend_from_slice(&[0xc3, 0x28, b'\n']);

    let report = default_processor().process(&bytes, "dump.bin").unwrap();
    assert_eq!(report.records.len(), 1);
}

#[test]
fn test_process_path_uses_file_name_for_kind() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path().join("reports.csv.d");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("bench.txt");
    fs::write(&path, "GPS Lock Passed\n").unwrap();

    let report = default_processor().process_path(&path).unwrap();
    assert_eq!(report.filename, "bench.txt");
    assert_eq!(report.records.len(), 1);
}
