//! Header row discovery for semi-structured battery logs.
//!
//! Spreadsheet exports from cyclers often carry a free-form preamble
//! (operator, cell id, channel) above the real table. The header row is the
//! first row whose cells include every configured token; its labels then
//! resolve the time, voltage, current and amp-hour columns.

use crate::constants::profile_columns;
use crate::models::Grid;
use tracing::debug;

/// Location of the header row and its normalised labels
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderRow {
    /// Index of the header row within the grid
    pub index: usize,
    /// Upper-cased, trimmed cell labels
    pub labels: Vec<String>,
}

/// Column indices of the four battery profile series
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileColumns {
    pub time: usize,
    pub voltage: usize,
    pub current: usize,
    pub amp_hours: usize,
}

/// Find the first row whose upper-cased cells contain every token.
///
/// Scanning stops at the first hit; later rows are never considered.
pub fn find_header_row(grid: &Grid, tokens: &[String]) -> Option<HeaderRow> {
    let tokens: Vec<String> = tokens.iter().map(|token| token.to_uppercase()).collect();

    let index = grid.iter().position(|row| {
        let cells: Vec<String> = row.iter().map(|cell| cell.to_uppercase()).collect();
        tokens.iter().all(|token| cells.contains(token))
    });

    match index {
        Some(index) => {
            let labels = grid[index]
                .iter()
                .map(|cell| cell.trim().to_uppercase())
                .collect();
            debug!("Header row found at index {}", index);
            Some(HeaderRow { index, labels })
        }
        None => {
            debug!("No header row containing {:?} in {} rows", tokens, grid.len());
            None
        }
    }
}

/// Builder for profile column resolution
struct ProfileColumnsBuilder {
    time: Option<usize>,
    voltage: Option<usize>,
    current: Option<usize>,
    amp_hours: Option<usize>,
}

impl ProfileColumnsBuilder {
    fn new() -> Self {
        Self {
            time: None,
            voltage: None,
            current: None,
            amp_hours: None,
        }
    }

    /// Record the column if its label is the first to contain a token
    fn parse_label(&mut self, index: usize, label: &str) {
        let slots = [
            (profile_columns::TIME, &mut self.time),
            (profile_columns::VOLTAGE, &mut self.voltage),
            (profile_columns::CURRENT, &mut self.current),
            (profile_columns::AMP_HOURS, &mut self.amp_hours),
        ];

        for (token, slot) in slots {
            if slot.is_none() && label.contains(token) {
                *slot = Some(index);
            }
        }
    }

    fn build(self) -> Option<ProfileColumns> {
        Some(ProfileColumns {
            time: self.time?,
            voltage: self.voltage?,
            current: self.current?,
            amp_hours: self.amp_hours?,
        })
    }
}

impl HeaderRow {
    /// Resolve the four profile columns by label substring.
    ///
    /// Returns `None` unless all four are present.
    pub fn profile_columns(&self) -> Option<ProfileColumns> {
        let mut builder = ProfileColumnsBuilder::new();
        for (index, label) in self.labels.iter().enumerate() {
            builder.parse_label(index, label);
        }

        let columns = builder.build();
        if columns.is_none() {
            debug!("Header labels {:?} lack a profile column", self.labels);
        }
        columns
    }
}
