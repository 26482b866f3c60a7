//! In-memory data source

use super::types::DataSource;
use crate::error::Result;
use async_trait::async_trait;
use mongodb::bson::{Bson, Document};

/// Records held in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    name: String,
    records: Vec<Bson>,
    indexes: Vec<Document>,
    total_count: Option<u64>,
}

impl MemorySource {
    /// Create a source from records
    pub fn new(name: impl Into<String>, records: Vec<Bson>) -> Self {
        Self {
            name: name.into(),
            records,
            indexes: Vec::new(),
            total_count: None,
        }
    }

    /// Create a source from documents
    pub fn from_documents(name: impl Into<String>, docs: Vec<Document>) -> Self {
        Self::new(name, docs.into_iter().map(Bson::Document).collect())
    }

    /// Set the index list
    #[must_use]
    pub fn with_indexes(mut self, indexes: Vec<Document>) -> Self {
        self.indexes = indexes;
        self
    }

    /// Report a population larger than the records held
    #[must_use]
    pub fn with_total_count(mut self, total_count: u64) -> Self {
        self.total_count = Some(total_count);
        self
    }

    /// Records held
    pub fn records(&self) -> &[Bson] {
        &self.records
    }
}

#[async_trait]
impl DataSource for MemorySource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn sample(&self, limit: usize) -> Result<Vec<Bson>> {
        Ok(self.records.iter().take(limit).cloned().collect())
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.total_count.unwrap_or(self.records.len() as u64))
    }

    async fn list_indexes(&self) -> Result<Vec<Document>> {
        Ok(self.indexes.clone())
    }
}
