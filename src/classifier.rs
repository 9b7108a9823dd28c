//! Ordered regex line classifier.
//!
//! Turns one line of a free-text report into a [`TestRecord`]. Five line
//! shapes are tried in a fixed order and the first match wins; a line
//! matching none of them produces nothing.

use crate::config::StandardsTable;
use crate::constants::{FAIL_MARKER, LINE_TERMINATORS, PASS_MARKERS, line_patterns};
use crate::error::Result;
use crate::models::{TestOutcome, TestRecord};
use regex::{Captures, Regex, RegexBuilder};
use tracing::{debug, trace};

/// Recognised line shapes, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineShape {
    /// `name --> Passed --> actual`
    TripleArrow,
    /// `name --> trailing`
    Arrow,
    /// `12: NAME_WITH_UNDERSCORES: "RESULT"`
    NumberedKeyValue,
    /// `name is passed`
    IsPhrase,
    /// `name Failed`
    TrailingVerdict,
}

/// Shapes paired with their patterns. Index order is match precedence.
pub const LINE_PATTERNS: [(LineShape, &str); 5] = [
    (LineShape::TripleArrow, line_patterns::TRIPLE_ARROW),
    (LineShape::Arrow, line_patterns::ARROW),
    (LineShape::NumberedKeyValue, line_patterns::NUMBERED_KEY_VALUE),
    (LineShape::IsPhrase, line_patterns::IS_PHRASE),
    (LineShape::TrailingVerdict, line_patterns::TRAILING_VERDICT),
];

impl LineShape {
    /// Build a record from the captures of this shape's pattern
    fn extract(self, caps: &Captures<'_>) -> TestRecord {
        let group = |i: usize| caps.get(i).map_or("", |m| m.as_str());

        match self {
            LineShape::TripleArrow => {
                TestRecord::new(group(1).trim(), TestOutcome::from_verdict(group(2)))
                    .with_actual(group(3).trim())
            }
            LineShape::Arrow => {
                let trailing = group(2).trim();
                TestRecord::new(group(1).trim(), classify_free_text(trailing))
                    .with_actual(trailing)
            }
            LineShape::NumberedKeyValue => TestRecord::new(
                group(1).replace('_', " ").trim(),
                TestOutcome::Verbatim(group(2).to_uppercase()),
            ),
            LineShape::IsPhrase | LineShape::TrailingVerdict => {
                TestRecord::new(group(1).trim(), TestOutcome::from_verdict(group(2)))
            }
        }
    }
}

/// Verdict of free trailing text: pass markers win over the fail marker
fn classify_free_text(text: &str) -> TestOutcome {
    let lower = text.to_lowercase();
    if PASS_MARKERS.iter().any(|marker| lower.contains(marker)) {
        TestOutcome::Pass
    } else if lower.contains(FAIL_MARKER) {
        TestOutcome::Fail
    } else {
        TestOutcome::Info
    }
}

/// Records and diagnostics from classifying a block of text
#[derive(Debug, Clone, Default)]
pub struct ClassifiedText {
    pub records: Vec<TestRecord>,
    /// Non-empty lines that matched no shape
    pub unmatched_lines: usize,
}

/// Line classifier with compiled patterns and an injected standards table
#[derive(Debug, Clone)]
pub struct LineClassifier {
    patterns: Vec<(LineShape, Regex)>,
    standards: StandardsTable,
}

impl LineClassifier {
    /// Compile the line patterns
    pub fn new(standards: StandardsTable) -> Result<Self> {
        let patterns = LINE_PATTERNS
            .iter()
            .map(|(shape, pattern)| -> Result<(LineShape, Regex)> {
                let regex = RegexBuilder::new(pattern).case_insensitive(true).build()?;
                Ok((*shape, regex))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            patterns,
            standards,
        })
    }

    /// Shape of the first pattern matching the line, if any
    pub fn match_shape(&self, line: &str) -> Option<LineShape> {
        self.patterns
            .iter()
            .find(|(_, regex)| regex.is_match(line))
            .map(|(shape, _)| *shape)
    }

    /// Classify one trimmed line. Unmatched lines return `None`.
    pub fn classify_line(&self, line: &str) -> Option<TestRecord> {
        let (shape, caps) = self
            .patterns
            .iter()
            .find_map(|(shape, regex)| regex.captures(line).map(|caps| (*shape, caps)))?;

        let mut record = shape.extract(&caps);
        record.standard = self
            .standards
            .resolve(&record.test_name)
            .map(str::to_string);

        trace!("{:?} matched '{}' -> {}", shape, line, record.result);
        Some(record)
    }

    /// Classify every non-empty line of a text block.
    ///
    /// Lines end at any of [`LINE_TERMINATORS`], so CR-only and form-fed
    /// exports split the same way as LF files.
    pub fn classify_text(&self, text: &str) -> ClassifiedText {
        let mut classified = ClassifiedText::default();

        for line in text
            .split(LINE_TERMINATORS)
            .map(str::trim)
            .filter(|line| !line.is_empty())
        {
            match self.classify_line(line) {
                Some(record) => classified.records.push(record),
                None => classified.unmatched_lines += 1,
            }
        }

        debug!(
            "Classified {} lines, {} unmatched",
            classified.records.len(),
            classified.unmatched_lines
        );

        classified
    }
}
