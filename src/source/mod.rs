//! Data source module
//!
//! Where sampled records come from.
//!
//! # Overview
//!
//! The schema engine reads through the [`DataSource`] trait: a bounded
//! sample, a population count and the index list of one collection.
//! A [`Catalog`] groups collections and hands out sources by name.
//!
//! - `MemorySource` - records already in memory
//! - `FileSource` / `FileCatalog` - JSON and JSON Lines exports
//! - `MongoSource` / `MongoCatalog` - a live MongoDB database

mod file;
mod memory;
mod mongo;
mod types;

pub use file::{decode_records, FileCatalog, FileFormat, FileSource};
pub use memory::MemorySource;
pub use mongo::{MongoCatalog, MongoSource, DEFAULT_DATABASE};
pub use types::{Catalog, CollectionInfo, DataSource, SampleMode};

use crate::error::Result;
use crate::loader::SourceDefinition;

/// Open the catalog a source definition describes
pub async fn open_catalog(
    def: &SourceDefinition,
    mode: SampleMode,
) -> Result<Box<dyn Catalog>> {
    match def {
        SourceDefinition::Mongodb { uri, database } => {
            let catalog = MongoCatalog::connect(uri, database.as_deref())
                .await?
                .with_mode(mode);
            Ok(Box::new(catalog))
        }
        SourceDefinition::File {
            path,
            format,
            collection,
        } => {
            if mode == SampleMode::Random {
                tracing::warn!("Random sampling is not supported for files; reading in order");
            }
            let catalog = FileCatalog::new(path)
                .with_format(*format)
                .with_collection(collection.clone());
            Ok(Box::new(catalog))
        }
    }
}
