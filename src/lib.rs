//! Compliance Verifier Library
//!
//! Extracts pass/fail results from loosely structured automotive test
//! reports and summarises battery charge/discharge logs.
//!
//! This library provides tools for:
//! - Classifying free-text report lines with an ordered list of patterns
//! - Discovering the header row of cycler exports and summarising the profile
//! - Decoding text, CSV, workbook and PDF reports
//! - Looking up test procedures and component datasheet attributes

pub mod classifier;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod header;
pub mod knowledge;
pub mod models;
pub mod processor;
pub mod profile;
pub mod source;
pub mod summary;

// Re-export commonly used types
pub use classifier::{LineClassifier, LineShape};
pub use config::{StandardMapping, StandardsTable, VerifierConfig};
pub use error::{Result, VerifierError};
pub use knowledge::{ComponentDatabase, KnowledgeBase, KnowledgeTables};
pub use models::{
    BatteryProfileSummary, ExtractedRecord, Grid, ParsedReport, ReportKind, TestOutcome,
    TestRecord,
};
pub use processor::ReportProcessor;
pub use profile::extract_battery_profile;
pub use summary::{ReportSummary, SessionStats};
