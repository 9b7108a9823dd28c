//! Application constants for the compliance verifier
//!
//! This module contains the line patterns, header tokens, default lookup
//! tables and display labels used throughout the verifier.

// =============================================================================
// Line Classifier Patterns
// =============================================================================

/// Line patterns in priority order. The first pattern that matches wins.
///
/// All patterns are compiled case-insensitively.
pub mod line_patterns {
    /// `<name> --> <Passed|Failed|Success> --> <actual>`
    pub const TRIPLE_ARROW: &str = r"^(.*?)\s*-->\s*(Passed|Failed|Success)\s*-->\s*(.+)$";

    /// `<name> --> <trailing>`
    pub const ARROW: &str = r"^(.*?)\s*-->\s*(.+)$";

    /// `<N>: <UPPER_NAME>: "<UPPER_RESULT>"`
    pub const NUMBERED_KEY_VALUE: &str = r#"^\d+:\s*([A-Z_]+):\s*"([A-Z]+)"$"#;

    /// `<name> is <success|failure|passed|failed>`
    pub const IS_PHRASE: &str = r"^(.+?)\s+is\s+(success|failure|passed|failed)$";

    /// `<name> <Failed|Passed>`
    pub const TRAILING_VERDICT: &str = r"^(.+?)\s+(Failed|Passed)$";
}

/// Characters that end a line of report text, including lone CR and form feed
pub const LINE_TERMINATORS: [char; 10] = [
    '\n', '\r', '\x0b', '\x0c', '\x1c', '\x1d', '\x1e', '\u{85}', '\u{2028}', '\u{2029}',
];

/// Substrings that mark a free-text verdict as passing
pub const PASS_MARKERS: &[&str] = &["passed", "success"];

/// Substring that marks a free-text verdict as failing
pub const FAIL_MARKER: &str = "failed";

/// Sentinel shown for missing `actual` or `standard` values
pub const NOT_FOUND: &str = "Not found";

// =============================================================================
// Keyword to Standard Mapping
// =============================================================================

/// Default keyword to standard table, in precedence order
pub const DEFAULT_STANDARDS: &[(&str, &str)] = &[
    ("gps", "NMEA 0183"),
    ("can", "ISO 11898"),
    ("vibration", "IEC 60068-2-6"),
];

// =============================================================================
// Battery Profile Extraction
// =============================================================================

/// Cell tokens that must both appear in a row for it to be the header
pub const DEFAULT_HEADER_TOKENS: &[&str] = &["TIME", "VOLTAGE"];

/// Label substrings used to resolve the four profile columns
pub mod profile_columns {
    pub const TIME: &str = "TIME";
    pub const VOLTAGE: &str = "VOLTAGE";
    pub const CURRENT: &str = "CURRENT";
    pub const AMP_HOURS: &str = "AH";
}

/// Test name of the synthesised battery profile record
pub const PROFILE_TEST_NAME: &str = "Battery Charge/Discharge Profile";

/// Result label of the synthesised battery profile record
pub const PROFILE_RESULT: &str = "Data Extracted";

/// Detail labels of the battery profile record, in display order
pub mod profile_details {
    pub const DURATION: &str = "Duration";
    pub const START_VOLTAGE: &str = "Start Voltage";
    pub const END_VOLTAGE: &str = "End Voltage";
    pub const MAX_CURRENT: &str = "Max Current";
    pub const TOTAL_CAPACITY: &str = "Total Capacity";
}

// =============================================================================
// Orchestration
// =============================================================================

/// Phrase that triggers the generic summary record when nothing else matched
pub const DEFAULT_SUMMARY_PHRASE: &str = "test summary";

/// Test name of the generic summary record
pub const SUMMARY_TEST_NAME: &str = "Test Summary";

/// File extensions decoded as comma-separated grids
pub const CSV_EXTENSIONS: &[&str] = &["csv"];

/// File extensions decoded as workbooks
pub const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls"];

/// File extensions decoded as PDF documents
pub const PDF_EXTENSIONS: &[&str] = &["pdf"];

/// Extensions collected when walking a directory of reports
pub const REPORT_EXTENSIONS: &[&str] = &["csv", "xlsx", "xlsm", "xls", "pdf", "txt", "log"];

// =============================================================================
// Configuration Locations
// =============================================================================

/// Directory name under the platform config dir
pub const CONFIG_DIR_NAME: &str = "compliance-verifier";

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "config.json";
