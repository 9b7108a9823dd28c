//! Report processing pipeline.
//!
//! Dispatches an uploaded report on its file extension: grids are first
//! offered to the battery profile extractor and otherwise flattened to
//! text; text is classified line by line. Decode failures abort the report
//! with an error and no partial records.

#[cfg(test)]
pub mod tests;

use crate::classifier::LineClassifier;
use crate::config::VerifierConfig;
use crate::constants::SUMMARY_TEST_NAME;
use crate::error::{Result, VerifierError};
use crate::models::{ExtractedRecord, ParsedReport, ReportKind, TestOutcome, TestRecord};
use crate::profile::extract_battery_profile_with;
use crate::source::{decode_csv, decode_pdf, decode_text, decode_workbook, flatten_grid};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Main processor for uploaded test reports
#[derive(Debug, Clone)]
pub struct ReportProcessor {
    config: VerifierConfig,
    classifier: LineClassifier,
}

impl ReportProcessor {
    /// Create a processor, compiling the line patterns
    pub fn new(config: VerifierConfig) -> Result<Self> {
        config.validate()?;
        let classifier = LineClassifier::new(config.standards.clone())?;
        Ok(Self { config, classifier })
    }

    /// Read a report from disk and process it
    pub fn process_path(&self, path: &Path) -> Result<ParsedReport> {
        if !path.is_file() {
            return Err(VerifierError::ReportNotFound {
                path: path.to_path_buf(),
            });
        }

        let bytes = fs::read(path)?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        self.process(&bytes, &filename)
    }

    /// Process raw report bytes; `filename` only supplies the extension hint
    pub fn process(&self, bytes: &[u8], filename: &str) -> Result<ParsedReport> {
        let kind = ReportKind::from_filename(filename);
        let mut report = ParsedReport::new(filename, kind);
        debug!("Processing {} ({} bytes) as {:?}", filename, bytes.len(), kind);

        let text = if kind.is_tabular() {
            let grid = if kind == ReportKind::Csv {
                decode_csv(bytes)?
            } else {
                decode_workbook(bytes, filename)?
            };

            if let Some(profile) =
                extract_battery_profile_with(&grid, &self.config.profile_header_tokens)
            {
                info!("{}: extracted battery profile", filename);
                report.records.push(ExtractedRecord::Profile(profile));
                return Ok(report);
            }

            debug!("{}: no battery profile, classifying rows as text", filename);
            flatten_grid(&grid)
        } else if kind == ReportKind::Pdf {
            decode_pdf(bytes)?
        } else {
            decode_text(bytes)
        };

        let classified = self.classifier.classify_text(&text);
        report.unmatched_lines = classified.unmatched_lines;
        report
            .records
            .extend(classified.records.into_iter().map(ExtractedRecord::Test));

        if report.records.is_empty() && self.mentions_summary_phrase(&text) {
            warn!(
                "{}: no test lines recognised, emitting generic PASS from summary phrase",
                filename
            );
            report.records.push(ExtractedRecord::Test(TestRecord::new(
                SUMMARY_TEST_NAME,
                TestOutcome::Pass,
            )));
            report.used_summary_fallback = true;
        }

        info!(
            "{}: {} records, {} unmatched lines",
            filename,
            report.records.len(),
            report.unmatched_lines
        );

        Ok(report)
    }

    fn mentions_summary_phrase(&self, text: &str) -> bool {
        self.config
            .summary_fallback_phrase
            .as_ref()
            .is_some_and(|phrase| text.to_lowercase().contains(&phrase.to_lowercase()))
    }
}
