//! YAML parser for probe definitions
//!
//! Parses and validates probe YAML files.

use crate::error::{Error, Result};
use crate::loader::types::{ProbeDefinition, SourceDefinition};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Load a probe definition from a YAML file
pub fn load_definition(path: impl AsRef<Path>) -> Result<ProbeDefinition> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let yaml = fs::read_to_string(path)
        .map_err(|e| Error::config(format!("Failed to read definition file: {e}")))?;
    load_definition_from_str(&yaml)
}

/// Load a probe definition from a YAML string
pub fn load_definition_from_str(yaml: &str) -> Result<ProbeDefinition> {
    let def: ProbeDefinition = serde_yaml::from_str(yaml)?;

    validate_definition(&def)?;
    Ok(def)
}

/// Validate a probe definition
pub fn validate_definition(def: &ProbeDefinition) -> Result<()> {
    if def.name.trim().is_empty() {
        return Err(Error::config("Probe name cannot be empty"));
    }

    validate_source(&def.source)?;

    let mut seen = HashSet::new();
    for collection in &def.collections {
        if collection.trim().is_empty() {
            return Err(Error::invalid_value(
                "collections",
                "collection names cannot be empty",
            ));
        }
        if !seen.insert(collection.as_str()) {
            return Err(Error::invalid_value(
                "collections",
                format!("duplicate collection '{collection}'"),
            ));
        }
    }

    Ok(())
}

/// Validate a source definition
fn validate_source(source: &SourceDefinition) -> Result<()> {
    match source {
        SourceDefinition::Mongodb { uri, database } => {
            if uri.trim().is_empty() {
                return Err(Error::missing_field("source.uri"));
            }
            if !uri.starts_with("mongodb://") && !uri.starts_with("mongodb+srv://") {
                return Err(Error::invalid_value(
                    "source.uri",
                    "expected a mongodb:// or mongodb+srv:// URI",
                ));
            }
            if database.as_deref().is_some_and(|d| d.trim().is_empty()) {
                return Err(Error::invalid_value(
                    "source.database",
                    "database name cannot be empty",
                ));
            }
        }
        SourceDefinition::File {
            path, collection, ..
        } => {
            if path.as_os_str().is_empty() {
                return Err(Error::missing_field("source.path"));
            }
            if collection.as_deref().is_some_and(|c| c.trim().is_empty()) {
                return Err(Error::invalid_value(
                    "source.collection",
                    "collection name cannot be empty",
                ));
            }
        }
    }

    Ok(())
}
