//! Configuration management and validation.
//!
//! Provides the injected lookup tables for the line classifier, the
//! battery profile header tokens and the summary-phrase fallback switch.
//! Configuration is plain JSON so tables can be swapped without a rebuild.

use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_HEADER_TOKENS, DEFAULT_STANDARDS,
    DEFAULT_SUMMARY_PHRASE,
};
use crate::error::{Result, VerifierError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A single keyword to standard association
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardMapping {
    /// Lower-case substring searched for in test names
    pub keyword: String,

    /// Standard reported when the keyword matches
    pub standard: String,
}

impl StandardMapping {
    pub fn new(keyword: impl Into<String>, standard: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            standard: standard.into(),
        }
    }
}

/// Ordered keyword to standard table. Declaration order is precedence order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StandardsTable {
    mappings: Vec<StandardMapping>,
}

impl Default for StandardsTable {
    fn default() -> Self {
        Self {
            mappings: DEFAULT_STANDARDS
                .iter()
                .map(|(keyword, standard)| StandardMapping::new(*keyword, *standard))
                .collect(),
        }
    }
}

impl StandardsTable {
    pub fn new(mappings: Vec<StandardMapping>) -> Self {
        Self { mappings }
    }

    /// Resolve the standard for a test name; the first declared keyword wins
    pub fn resolve(&self, test_name: &str) -> Option<&str> {
        let name = test_name.to_lowercase();
        self.mappings
            .iter()
            .find(|mapping| name.contains(&mapping.keyword.to_lowercase()))
            .map(|mapping| mapping.standard.as_str())
    }

    pub fn mappings(&self) -> &[StandardMapping] {
        &self.mappings
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

/// Global configuration for report verification
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifierConfig {
    /// Keyword to standard table used to enrich classified lines
    pub standards: StandardsTable,

    /// Phrase that yields a generic PASS record when nothing else matched.
    /// `None` disables the fallback.
    pub summary_fallback_phrase: Option<String>,

    /// Tokens that must all appear as cells of the battery profile header row
    pub profile_header_tokens: Vec<String>,

    /// Optional JSON file with procedures and components
    pub knowledge_base_path: Option<PathBuf>,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            standards: StandardsTable::default(),
            summary_fallback_phrase: Some(DEFAULT_SUMMARY_PHRASE.to_string()),
            profile_header_tokens: DEFAULT_HEADER_TOKENS
                .iter()
                .map(|token| token.to_string())
                .collect(),
            knowledge_base_path: None,
        }
    }
}

impl VerifierConfig {
    /// Load configuration from a JSON file. Missing fields take defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;

        debug!(
            "Loaded configuration from {}: {} standard mappings",
            path.display(),
            config.standards.len()
        );

        Ok(config)
    }

    /// Default configuration file location, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load from an explicit path, else the default location if it exists,
    /// else built-in defaults
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_json_file(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => Self::from_json_file(&path),
            _ => {
                debug!("No configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Reject tables that would match every test name or never find a header
    pub fn validate(&self) -> Result<()> {
        if let Some(mapping) = self
            .standards
            .mappings()
            .iter()
            .find(|mapping| mapping.keyword.trim().is_empty())
        {
            return Err(VerifierError::Configuration {
                message: format!(
                    "Empty keyword in standards table (standard '{}')",
                    mapping.standard
                ),
            });
        }

        if self.profile_header_tokens.is_empty() {
            return Err(VerifierError::Configuration {
                message: "profile_header_tokens must contain at least one token".to_string(),
            });
        }

        if self
            .profile_header_tokens
            .iter()
            .any(|token| token.trim().is_empty())
        {
            return Err(VerifierError::Configuration {
                message: format!(
                    "Blank entry in profile_header_tokens {:?}",
                    self.profile_header_tokens
                ),
            });
        }

        if let Some(phrase) = &self.summary_fallback_phrase {
            if phrase.trim().is_empty() {
                return Err(VerifierError::Configuration {
                    message: "summary_fallback_phrase must not be blank; use null to disable"
                        .to_string(),
                });
            }
        }

        Ok(())
    }

    /// Replace the keyword to standard table
    pub fn with_standards(mut self, standards: StandardsTable) -> Self {
        self.standards = standards;
        self
    }

    /// Disable the generic summary record
    pub fn without_summary_fallback(mut self) -> Self {
        self.summary_fallback_phrase = None;
        self
    }

    /// Set the phrase that triggers the generic summary record
    pub fn with_summary_fallback_phrase(mut self, phrase: impl Into<String>) -> Self {
        self.summary_fallback_phrase = Some(phrase.into());
        self
    }

    /// Set the knowledge base file
    pub fn with_knowledge_base_path(mut self, path: PathBuf) -> Self {
        self.knowledge_base_path = Some(path);
        self
    }
}
