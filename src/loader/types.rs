//! Loader types
//!
//! Declarative probe definition types for YAML parsing.

use crate::schema::DEFAULT_SAMPLE_SIZE;
use crate::source::{FileFormat, SampleMode};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Probe Definition
// ============================================================================

/// Top-level probe definition: where to read and how much to sample
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProbeDefinition {
    /// Probe name
    pub name: String,
    /// Definition version
    #[serde(default = "default_version")]
    pub version: String,
    /// Where records come from
    pub source: SourceDefinition,
    /// Sampling settings
    #[serde(default)]
    pub sampling: SamplingDefinition,
    /// Collections to infer (empty = all)
    #[serde(default)]
    pub collections: Vec<String>,
}

fn default_version() -> String {
    "0.1.0".to_string()
}

// ============================================================================
// Source Definition
// ============================================================================

/// Record source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SourceDefinition {
    /// A MongoDB database
    Mongodb {
        /// Connection URI
        uri: String,
        /// Database name (defaults to the URI's, then "test")
        #[serde(default)]
        database: Option<String>,
    },
    /// A JSON/JSONL file, or a directory of them
    File {
        /// File or directory path
        path: PathBuf,
        /// Force a format instead of guessing from extensions
        #[serde(default)]
        format: Option<FileFormat>,
        /// Collection name for a single file (defaults to the file stem)
        #[serde(default)]
        collection: Option<String>,
    },
}

impl SourceDefinition {
    /// Short label for logs
    pub fn kind(&self) -> &'static str {
        match self {
            SourceDefinition::Mongodb { .. } => "mongodb",
            SourceDefinition::File { .. } => "file",
        }
    }
}

// ============================================================================
// Sampling Definition
// ============================================================================

/// Sampling settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SamplingDefinition {
    /// Records read per collection
    #[serde(default = "default_sample_size")]
    pub size: usize,
    /// How records are picked
    #[serde(default)]
    pub mode: SampleMode,
}

fn default_sample_size() -> usize {
    DEFAULT_SAMPLE_SIZE
}

impl Default for SamplingDefinition {
    fn default() -> Self {
        Self {
            size: DEFAULT_SAMPLE_SIZE,
            mode: SampleMode::First,
        }
    }
}
