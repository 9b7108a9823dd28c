//! Report content decoding.
//!
//! Turns uploaded bytes into either a grid of cells (CSV, workbooks) or a
//! block of text (PDF, plain text). Text decoding is permissive; grid and
//! PDF decoding fail on corrupt input.

use crate::error::{Result, VerifierError};
use crate::models::Grid;
use calamine::Reader;
use std::io::Cursor;
use tracing::debug;

/// Decode comma-separated bytes into a ragged grid.
///
/// No row is assumed to be the header. Invalid UTF-8 is replaced.
pub fn decode_csv(bytes: &[u8]) -> Result<Grid> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut grid = Grid::new();
    for record in reader.byte_records() {
        let record = record?;
        grid.push(
            record
                .iter()
                .map(|field| String::from_utf8_lossy(field).into_owned())
                .collect(),
        );
    }

    debug!("Decoded CSV grid with {} rows", grid.len());
    Ok(grid)
}

/// Decode the first worksheet of an xlsx/xlsm/xls workbook
pub fn decode_workbook(bytes: &[u8], filename: &str) -> Result<Grid> {
    let mut workbook = calamine::open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| VerifierError::UnreadableReport {
            file: filename.to_string(),
            reason: "workbook has no worksheets".to_string(),
        })??;

    let grid: Grid = range
        .rows()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect();

    debug!("Decoded worksheet with {} rows", grid.len());
    Ok(grid)
}

/// Extract PDF text page by page, joined with newlines
pub fn decode_pdf(bytes: &[u8]) -> Result<String> {
    let document = lopdf::Document::load_mem(bytes)?;

    // get_pages is keyed by page number, so iteration is in page order
    let pages = document
        .get_pages()
        .keys()
        .map(|page| document.extract_text(&[*page]))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    debug!("Extracted text from {} PDF pages", pages.len());
    Ok(pages.join("\n"))
}

/// Decode bytes as text, replacing undecodable sequences
pub fn decode_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Flatten a grid to one line per row: non-empty cells joined by a space
pub fn flatten_grid(grid: &Grid) -> String {
    grid.iter()
        .map(|row| {
            row.iter()
                .map(|cell| cell.trim())
                .filter(|cell| !cell.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processor::tests::{CYCLER_XLSX, pdf_document};

    #[test]
    fn test_decode_ragged_csv() {
        let bytes = b"Cell ID,B-0042\nTIME,VOLTAGE,CURRENT,AH\n0,12.6,1.0,0.0\n";
        let grid = decode_csv(bytes).unwrap();

        assert_eq!(grid.len(), 3);
        assert_eq!(grid[0], vec!["Cell ID", "B-0042"]);
        assert_eq!(grid[1].len(), 4);
    }

    #[test]
    fn test_decode_csv_replaces_invalid_utf8() {
        let bytes = b"name,\xff\xfe\n";
        let grid = decode_csv(bytes).unwrap();
        assert_eq!(grid[0][0], "name");
        assert!(grid[0][1].contains('\u{fffd}'));
    }

    #[test]
    fn test_decode_text_is_permissive() {
        let text = decode_text(b"GPS Lock Passed\n\xc3\x28 junk\n");
        assert!(text.starts_with("GPS Lock Passed\n"));
    }

    #[test]
    fn test_flatten_grid() {
        let grid: Grid = vec![
            vec!["CAN Bus Test Failed".to_string(), "".to_string()],
            vec![" Boot ".to_string(), "".to_string(), "is success".to_string()],
            vec![],
        ];
        assert_eq!(flatten_grid(&grid), "CAN Bus Test Failed\nBoot is success\n");
    }

    #[test]
    fn test_decode_workbook_first_sheet() {
        let grid = decode_workbook(CYCLER_XLSX, "cycler_export.xlsx").unwrap();

        assert_eq!(grid.len(), 5);
        assert_eq!(grid[0][0], "Cycler export");
        assert_eq!(grid[1], vec!["Time", "Voltage", "Current (A)", "Ah"]);
        assert_eq!(grid[2][1], "48.2");
        assert_eq!(grid[4][0], "01:00:00");
    }

    #[test]
    fn test_decode_pdf_joins_pages_in_order() {
        let bytes = pdf_document(&[
            &["GPS Lock Passed", "CAN Bus Test Failed"],
            &["Vibration Sweep Passed"],
        ]);

        let text = decode_pdf(&bytes).unwrap();
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        assert_eq!(
            lines,
            vec!["GPS Lock Passed", "CAN Bus Test Failed", "Vibration Sweep Passed"]
        );
    }

    #[test]
    fn test_corrupt_pdf_is_error() {
        assert!(matches!(
            decode_pdf(b"not a pdf"),
            Err(VerifierError::Pdf(_))
        ));
    }

    #[test]
    fn test_corrupt_workbook_is_error() {
        assert!(decode_workbook(b"PK\x03\x04 truncated", "broken.xlsx").is_err());
    }
}
