//! Test procedure knowledge base and component database.
//!
//! Both are read-only lookup tables loaded once from JSON and passed to
//! whoever needs them. A miss is `None`, never an error.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Built-in seed tables
const BUILTIN_TABLES: &str = include_str!("../data/knowledge_base.json");

/// Canned description of a compliance test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestProcedure {
    /// Lower-case lookup key, e.g. "thermal shock"
    pub key: String,
    pub name: String,
    pub standard: String,
    pub description: String,
    #[serde(default)]
    pub procedure: Vec<String>,
    #[serde(default)]
    pub equipment: Vec<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// A part with its datasheet attributes in display order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub part_number: String,
    pub attributes: Vec<(String, String)>,
}

impl Component {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Keyword lookup over test procedures
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KnowledgeBase {
    procedures: Vec<TestProcedure>,
}

impl KnowledgeBase {
    pub fn new(procedures: Vec<TestProcedure>) -> Self {
        Self { procedures }
    }

    /// First procedure whose key contains the query, in declaration order
    pub fn find_procedure(&self, query: &str) -> Option<&TestProcedure> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return None;
        }

        self.procedures
            .iter()
            .find(|procedure| procedure.key.to_lowercase().contains(&query))
    }

    pub fn procedures(&self) -> &[TestProcedure] {
        &self.procedures
    }

    pub fn len(&self) -> usize {
        self.procedures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.procedures.is_empty()
    }
}

/// Exact part-number lookup over components
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentDatabase {
    components: Vec<Component>,
}

impl ComponentDatabase {
    pub fn new(components: Vec<Component>) -> Self {
        Self { components }
    }

    /// Exact match on the trimmed, lower-cased part number
    pub fn lookup(&self, part_number: &str) -> Option<&Component> {
        let part_number = part_number.trim().to_lowercase();
        self.components
            .iter()
            .find(|component| component.part_number.to_lowercase() == part_number)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

/// Both lookup tables as stored on disk
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KnowledgeTables {
    #[serde(default)]
    pub procedures: KnowledgeBase,
    #[serde(default)]
    pub components: ComponentDatabase,
}

impl KnowledgeTables {
    /// Seed tables compiled into the binary
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(BUILTIN_TABLES)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let tables = Self::from_json_str(&fs::read_to_string(path)?)?;
        debug!(
            "Loaded {} procedures and {} components from {}",
            tables.procedures.len(),
            tables.components.len(),
            path.display()
        );
        Ok(tables)
    }

    /// Load from `path` if given, else the built-in seed tables
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_json_file(path),
            None => Self::builtin(),
        }
    }
}
