//! Error handling for report verification.
//!
//! Only I/O and decode failures are errors. A line or grid that does not
//! match any known shape is an expected outcome and never surfaces here.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VerifierError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV decode error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet decode error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("PDF decode error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("Invalid line pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Report file not found: {path}")]
    ReportNotFound { path: PathBuf },

    #[error("Unreadable report '{file}': {reason}")]
    UnreadableReport { file: String, reason: String },
}

pub type Result<T> = std::result::Result<T, VerifierError>;
