//! Core data structures for report verification.
//!
//! Defines report kinds, extracted test records, battery profile summaries
//! and the per-report parse result used throughout the library.

use crate::constants::{
    CSV_EXTENSIONS, NOT_FOUND, PDF_EXTENSIONS, PROFILE_RESULT, PROFILE_TEST_NAME,
    SPREADSHEET_EXTENSIONS, profile_details,
};
use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};
use std::fmt;
use std::path::Path;

/// A 2-D block of cells with no assumed header row. Rows may be ragged.
pub type Grid = Vec<Vec<String>>;

/// How the content of an uploaded report is decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    Csv,
    Spreadsheet,
    Pdf,
    Text,
}

impl ReportKind {
    /// Detect report kind from the file extension
    pub fn from_filename(filename: &str) -> Self {
        let extension = Path::new(filename)
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        if CSV_EXTENSIONS.contains(&extension.as_str()) {
            ReportKind::Csv
        } else if SPREADSHEET_EXTENSIONS.contains(&extension.as_str()) {
            ReportKind::Spreadsheet
        } else if PDF_EXTENSIONS.contains(&extension.as_str()) {
            ReportKind::Pdf
        } else {
            ReportKind::Text
        }
    }

    /// Whether the content is decoded as a grid of cells
    pub fn is_tabular(&self) -> bool {
        matches!(self, ReportKind::Csv | ReportKind::Spreadsheet)
    }
}

/// Verdict attached to a classified line
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TestOutcome {
    Pass,
    Fail,
    Info,
    #[default]
    NotAvailable,
    /// Upper-cased result token stored as given, e.g. from telemetry logs
    Verbatim(String),
}

impl TestOutcome {
    /// Normalize a verdict word: `passed`/`success` pass, anything else fails
    pub fn from_verdict(word: &str) -> Self {
        let word = word.to_lowercase();
        if word == "passed" || word == "success" {
            TestOutcome::Pass
        } else {
            TestOutcome::Fail
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            TestOutcome::Pass => "PASS",
            TestOutcome::Fail => "FAIL",
            TestOutcome::Info => "INFO",
            TestOutcome::NotAvailable => "N/A",
            TestOutcome::Verbatim(token) => token,
        }
    }
}

impl fmt::Display for TestOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TestOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A single classified line from a textual report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestRecord {
    pub test_name: String,
    pub result: TestOutcome,
    pub actual: Option<String>,
    pub standard: Option<String>,
}

impl TestRecord {
    pub fn new(test_name: impl Into<String>, result: TestOutcome) -> Self {
        Self {
            test_name: test_name.into(),
            result,
            actual: None,
            standard: None,
        }
    }

    pub fn with_actual(mut self, actual: impl Into<String>) -> Self {
        self.actual = Some(actual.into());
        self
    }

    /// Actual value, or the "Not found" sentinel
    pub fn actual_or_sentinel(&self) -> &str {
        self.actual.as_deref().unwrap_or(NOT_FOUND)
    }

    /// Standard, or the "Not found" sentinel
    pub fn standard_or_sentinel(&self) -> &str {
        self.standard.as_deref().unwrap_or(NOT_FOUND)
    }
}

/// Derived statistics of a battery charge/discharge log
#[derive(Debug, Clone, PartialEq)]
pub struct BatteryProfileSummary {
    /// Time cell of the last usable row, passed through verbatim
    pub duration: String,
    pub start_voltage: f64,
    pub end_voltage: f64,
    /// Maximum absolute current across usable rows
    pub max_current: f64,
    pub total_capacity: f64,
}

impl BatteryProfileSummary {
    pub fn test_name(&self) -> &'static str {
        PROFILE_TEST_NAME
    }

    pub fn result(&self) -> &'static str {
        PROFILE_RESULT
    }

    /// Named statistics in display order, numbers rendered to 2 decimals
    pub fn details(&self) -> Vec<(&'static str, String)> {
        vec![
            (profile_details::DURATION, self.duration.clone()),
            (
                profile_details::START_VOLTAGE,
                format!("{:.2}", self.start_voltage),
            ),
            (
                profile_details::END_VOLTAGE,
                format!("{:.2}", self.end_voltage),
            ),
            (
                profile_details::MAX_CURRENT,
                format!("{:.2}", self.max_current),
            ),
            (
                profile_details::TOTAL_CAPACITY,
                format!("{:.2}", self.total_capacity),
            ),
        ]
    }
}

struct DetailsMap<'a>(&'a [(&'static str, String)]);

impl Serialize for DetailsMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (label, value) in self.0 {
            map.serialize_entry(label, value)?;
        }
        map.end()
    }
}

impl Serialize for BatteryProfileSummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let details = self.details();
        let mut state = serializer.serialize_struct("BatteryProfileSummary", 3)?;
        state.serialize_field("test_name", self.test_name())?;
        state.serialize_field("result", self.result())?;
        state.serialize_field("details", &DetailsMap(&details))?;
        state.end()
    }
}

/// One entry of a parsed report
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExtractedRecord {
    Test(TestRecord),
    Profile(BatteryProfileSummary),
}

impl ExtractedRecord {
    pub fn test_name(&self) -> &str {
        match self {
            ExtractedRecord::Test(record) => &record.test_name,
            ExtractedRecord::Profile(profile) => profile.test_name(),
        }
    }

    /// Result as displayed, used for PASS/FAIL bucketing
    pub fn result_label(&self) -> &str {
        match self {
            ExtractedRecord::Test(record) => record.result.as_str(),
            ExtractedRecord::Profile(profile) => profile.result(),
        }
    }
}

/// Output of one orchestration call
#[derive(Debug, Clone, Serialize)]
pub struct ParsedReport {
    pub filename: String,
    pub kind: ReportKind,
    pub records: Vec<ExtractedRecord>,
    /// Non-empty lines that matched no pattern
    pub unmatched_lines: usize,
    /// Set when the generic summary record was emitted
    pub used_summary_fallback: bool,
}

impl ParsedReport {
    pub fn new(filename: impl Into<String>, kind: ReportKind) -> Self {
        Self {
            filename: filename.into(),
            kind,
            records: Vec::new(),
            unmatched_lines: 0,
            used_summary_fallback: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
