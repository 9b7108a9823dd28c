//! Result bucketing and session counters.

use crate::models::{ExtractedRecord, ParsedReport};
use serde::Serialize;

/// Records of one report grouped by displayed result
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReportSummary<'a> {
    pub passed: Vec<&'a ExtractedRecord>,
    pub failed: Vec<&'a ExtractedRecord>,
    pub other: Vec<&'a ExtractedRecord>,
}

impl<'a> ReportSummary<'a> {
    /// Bucket by substring of the upper-cased result: PASS, then FAIL, else other
    pub fn from_records(records: &'a [ExtractedRecord]) -> Self {
        let mut summary = Self::default();

        for record in records {
            let label = record.result_label().to_uppercase();
            if label.contains("PASS") {
                summary.passed.push(record);
            } else if label.contains("FAIL") {
                summary.failed.push(record);
            } else {
                summary.other.push(record);
            }
        }

        summary
    }

    pub fn total(&self) -> usize {
        self.passed.len() + self.failed.len() + self.other.len()
    }
}

/// Counters for one verifier session
#[derive(Debug, Clone, Default, Serialize)]
pub struct SessionStats {
    pub reports_verified: usize,
    pub reports_failed: usize,
    pub components_in_db: usize,
}

impl SessionStats {
    pub fn new(components_in_db: usize) -> Self {
        Self {
            components_in_db,
            ..Self::default()
        }
    }

    /// Count a report that decoded; only reports with records are verified
    pub fn record_report(&mut self, report: &ParsedReport) {
        if !report.is_empty() {
            self.reports_verified += 1;
        }
    }

    /// Count a report that could not be decoded
    pub fn record_failure(&mut self) {
        self.reports_failed += 1;
    }
}
