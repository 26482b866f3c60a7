//! Data source types and traits
//!
//! Defines the seams the schema engine reads through.

use crate::error::Result;
use async_trait::async_trait;
use mongodb::bson::{Bson, Document};
use serde::{Deserialize, Serialize};

/// How a source picks its sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleMode {
    /// First `n` records in natural order (default)
    #[default]
    First,
    /// `n` random records, where the source supports it
    Random,
}

/// One collection the engine can sample
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Collection name
    fn name(&self) -> &str;

    /// Read at most `limit` records, in no guaranteed order
    async fn sample(&self, limit: usize) -> Result<Vec<Bson>>;

    /// Size of the whole population, independent of any sample
    async fn count(&self) -> Result<u64>;

    /// Index definitions, passed through verbatim
    async fn list_indexes(&self) -> Result<Vec<Document>>;
}

/// A collection advertised by a catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionInfo {
    /// Collection name
    pub name: String,

    /// Kind of collection (`collection`, `view`, `timeseries`, `file`)
    #[serde(rename = "type")]
    pub kind: String,
}

impl CollectionInfo {
    /// Create a collection info
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
        }
    }
}

/// A set of collections, e.g. a database or a directory of exports
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Tests that the backing store is reachable
    async fn check(&self) -> Result<()>;

    /// Lists available collections
    async fn list_collections(&self) -> Result<Vec<CollectionInfo>>;

    /// Opens one collection as a data source
    fn source(&self, collection: &str) -> Result<Box<dyn DataSource>>;
}
