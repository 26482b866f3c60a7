//! YAML Loader module
//!
//! Parse probe definitions from YAML files.
//!
//! # Overview
//!
//! The loader module provides:
//! - `ProbeDefinition` - which source to read and how to sample it
//! - `SourceDefinition` - MongoDB database or JSON/JSONL files
//! - YAML parsing with validation

mod parser;
mod types;

pub use parser::{load_definition, load_definition_from_str, validate_definition};
pub use types::{ProbeDefinition, SamplingDefinition, SourceDefinition};
