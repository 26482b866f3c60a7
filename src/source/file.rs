//! File-backed data sources
//!
//! Reads JSON exports (a top-level array, a single object, or JSON Lines).
//! Values are decoded as Extended JSON, so `{"$date": ...}` becomes a date
//! and `{"$oid": ...}` an ObjectId.

use super::types::{Catalog, CollectionInfo, DataSource};
use crate::error::{Error, Result};
use async_trait::async_trait;
use mongodb::bson::{Bson, Document};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::sync::OnceCell;

/// Layout of a record file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    /// One JSON document: an array of records or a single record
    #[default]
    Json,
    /// JSON Lines (one record per line)
    Jsonl,
}

impl FileFormat {
    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "json" => Some(FileFormat::Json),
            "jsonl" | "ndjson" => Some(FileFormat::Jsonl),
            _ => None,
        }
    }
}

/// Decode a file body into records
pub fn decode_records(body: &str, format: FileFormat) -> Result<Vec<Bson>> {
    let values = match format {
        FileFormat::Json => {
            let value: Value = serde_json::from_str(body)
                .map_err(|e| Error::decode(format!("Failed to parse JSON: {e}")))?;
            match value {
                Value::Array(items) => items,
                other => vec![other],
            }
        }
        FileFormat::Jsonl => {
            let mut values = Vec::new();
            for (line_num, line) in body.lines().enumerate() {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let value: Value = serde_json::from_str(line).map_err(|e| {
                    Error::decode(format!("Failed to parse JSONL at line {}: {e}", line_num + 1))
                })?;
                values.push(value);
            }
            values
        }
    };

    let records = values
        .into_iter()
        .enumerate()
        .map(|(i, value)| {
            if !value.is_object() {
                tracing::warn!("Record {} is not an object; it contributes no fields", i + 1);
            }
            to_record(i + 1, value)
        })
        .collect();
    Ok(records)
}

/// Convert one decoded value, falling back to plain JSON on bad Extended JSON
///
/// A record that cannot be converted at all stays in the sample as `null`.
fn to_record(position: usize, value: Value) -> Bson {
    match Bson::try_from(value.clone()) {
        Ok(record) => record,
        Err(e) => {
            tracing::warn!(
                "Invalid Extended JSON in record {position}: {e}; reading it as plain JSON"
            );
            mongodb::bson::to_bson(&value).unwrap_or_else(|e| {
                tracing::warn!("Record {position} cannot be converted: {e}; it contributes no fields");
                Bson::Null
            })
        }
    }
}

// ============================================================================
// File Source
// ============================================================================

/// One record file treated as a collection
#[derive(Debug)]
pub struct FileSource {
    name: String,
    path: PathBuf,
    format: FileFormat,
    records: OnceCell<Vec<Bson>>,
}

impl FileSource {
    /// Create a source, guessing the format from the extension
    ///
    /// The collection name defaults to the file stem.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let format = FileFormat::from_path(&path).unwrap_or_default();
        let name = collection_name(&path);
        Self {
            name,
            path,
            format,
            records: OnceCell::new(),
        }
    }

    /// Override the collection name
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Override the file format
    #[must_use]
    pub fn with_format(mut self, format: FileFormat) -> Self {
        self.format = format;
        self
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Records, read and decoded once
    async fn records(&self) -> Result<&Vec<Bson>> {
        self.records
            .get_or_try_init(|| async {
                tracing::debug!("Reading records from {}", self.path.display());
                let body = tokio::fs::read_to_string(&self.path)
                    .await
                    .map_err(|e| match e.kind() {
                        std::io::ErrorKind::NotFound => Error::FileNotFound {
                            path: self.path.display().to_string(),
                        },
                        _ => Error::Io(e),
                    })?;
                decode_records(&body, self.format)
            })
            .await
    }
}

#[async_trait]
impl DataSource for FileSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn sample(&self, limit: usize) -> Result<Vec<Bson>> {
        let records = self.records().await?;
        Ok(records.iter().take(limit).cloned().collect())
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.records().await?.len() as u64)
    }

    async fn list_indexes(&self) -> Result<Vec<Document>> {
        Ok(Vec::new())
    }
}

fn collection_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

// ============================================================================
// File Catalog
// ============================================================================

/// A record file, or a directory of them (one collection per file)
#[derive(Debug, Clone)]
pub struct FileCatalog {
    path: PathBuf,
    format: Option<FileFormat>,
    collection: Option<String>,
}

impl FileCatalog {
    /// Create a catalog over a file or directory
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            format: None,
            collection: None,
        }
    }

    /// Force a file format instead of guessing from extensions
    #[must_use]
    pub fn with_format(mut self, format: Option<FileFormat>) -> Self {
        self.format = format;
        self
    }

    /// Name the collection of a single-file catalog
    #[must_use]
    pub fn with_collection(mut self, collection: Option<String>) -> Self {
        self.collection = collection;
        self
    }

    fn open(&self, path: &Path, name: String) -> FileSource {
        let source = FileSource::new(path).with_name(name);
        match self.format {
            Some(format) => source.with_format(format),
            None => source,
        }
    }

    /// Record files in the directory, sorted by collection name
    async fn directory_entries(&self) -> Result<Vec<(String, PathBuf)>> {
        let mut entries = Vec::new();
        let mut dir = tokio::fs::read_dir(&self.path).await?;
        while let Some(entry) = dir.next_entry().await? {
            let path = entry.path();
            if path.is_file() && FileFormat::from_path(&path).is_some() {
                entries.push((collection_name(&path), path));
            }
        }
        entries.sort();
        Ok(entries)
    }
}

#[async_trait]
impl Catalog for FileCatalog {
    async fn check(&self) -> Result<()> {
        tokio::fs::metadata(&self.path)
            .await
            .map(|_| ())
            .map_err(|_| Error::FileNotFound {
                path: self.path.display().to_string(),
            })
    }

    async fn list_collections(&self) -> Result<Vec<CollectionInfo>> {
        self.check().await?;
        if self.path.is_dir() {
            let entries = self.directory_entries().await?;
            Ok(entries
                .into_iter()
                .map(|(name, _)| CollectionInfo::new(name, "file"))
                .collect())
        } else {
            let name = self
                .collection
                .clone()
                .unwrap_or_else(|| collection_name(&self.path));
            Ok(vec![CollectionInfo::new(name, "file")])
        }
    }

    fn source(&self, collection: &str) -> Result<Box<dyn DataSource>> {
        if self.path.is_dir() {
            for ext in ["jsonl", "ndjson", "json"] {
                let candidate = self.path.join(format!("{collection}.{ext}"));
                if candidate.is_file() {
                    return Ok(Box::new(self.open(&candidate, collection.to_string())));
                }
            }
            return Err(Error::collection_not_found(collection));
        }

        let name = self
            .collection
            .clone()
            .unwrap_or_else(|| collection_name(&self.path));
        if name != collection {
            return Err(Error::collection_not_found(collection));
        }
        Ok(Box::new(self.open(&self.path, name)))
    }
}
