//! MongoDB data sources

use super::types::{Catalog, CollectionInfo, DataSource, SampleMode};
use crate::error::{Error, Result};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, Bson, Document};
use mongodb::options::ClientOptions;
use mongodb::results::{CollectionSpecification, CollectionType};
use mongodb::{Client, Collection, Database};

/// Database used when neither the URI nor the caller names one
pub const DEFAULT_DATABASE: &str = "test";

/// One MongoDB collection
#[derive(Debug, Clone)]
pub struct MongoSource {
    database: Database,
    collection: Collection<Document>,
    name: String,
    mode: SampleMode,
}

impl MongoSource {
    /// Source for the named collection of `database`
    pub fn new(database: &Database, name: &str) -> Self {
        Self {
            database: database.clone(),
            collection: database.collection::<Document>(name),
            name: name.to_string(),
            mode: SampleMode::First,
        }
    }

    /// Set how the sample is drawn
    #[must_use]
    pub fn with_mode(mut self, mode: SampleMode) -> Self {
        self.mode = mode;
        self
    }
}

#[async_trait]
impl DataSource for MongoSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn sample(&self, limit: usize) -> Result<Vec<Bson>> {
        // limit(0) means "no limit" to the server
        if limit == 0 {
            return Ok(Vec::new());
        }

        let limit = server_limit(limit);
        let cursor = match self.mode {
            SampleMode::First => self.collection.find(doc! {}).limit(limit).await?,
            SampleMode::Random => {
                let pipeline = vec![doc! { "$sample": { "size": limit } }];
                self.collection.aggregate(pipeline).await?
            }
        };
        let docs: Vec<Document> = cursor.try_collect().await?;
        Ok(docs.into_iter().map(Bson::Document).collect())
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.collection.count_documents(doc! {}).await?)
    }

    async fn list_indexes(&self) -> Result<Vec<Document>> {
        // Raw command reply, so every server-reported index option is kept.
        // A collection holds at most 64 indexes, which fit in the first batch.
        let reply = self
            .database
            .run_command(doc! { "listIndexes": self.name.as_str() })
            .await?;
        let batch = reply
            .get_document("cursor")
            .and_then(|cursor| cursor.get_array("firstBatch"))
            .map_err(|e| {
                Error::source(format!("Unexpected listIndexes reply for '{}': {e}", self.name))
            })?;

        Ok(batch.iter().filter_map(Bson::as_document).cloned().collect())
    }
}

/// Clamp a sample size to the server's signed limit
///
/// A wrapped, negative limit would mean "single batch" to the server.
pub(super) fn server_limit(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

/// A MongoDB database
#[derive(Debug, Clone)]
pub struct MongoCatalog {
    client: Client,
    database: Database,
    mode: SampleMode,
}

impl MongoCatalog {
    /// Connect using a MongoDB URI
    ///
    /// The database is `database` if given, else the one named in the URI
    /// path, else [`DEFAULT_DATABASE`].
    pub async fn connect(uri: &str, database: Option<&str>) -> Result<Self> {
        let options = ClientOptions::parse(uri).await?;
        let db_name = database
            .map(String::from)
            .or_else(|| options.default_database.clone())
            .unwrap_or_else(|| DEFAULT_DATABASE.to_string());

        tracing::info!("Connecting to database: {}", db_name);
        let client = Client::with_options(options)?;
        let database = client.database(&db_name);

        Ok(Self {
            client,
            database,
            mode: SampleMode::First,
        })
    }

    /// Set how collection samples are drawn
    #[must_use]
    pub fn with_mode(mut self, mode: SampleMode) -> Self {
        self.mode = mode;
        self
    }

    /// Name of the database in use
    pub fn database_name(&self) -> &str {
        self.database.name()
    }

    /// Underlying client
    pub fn client(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl Catalog for MongoCatalog {
    async fn check(&self) -> Result<()> {
        self.database
            .run_command(doc! { "ping": 1 })
            .await
            .map(|_| ())
            .map_err(|e| Error::ConnectionCheck {
                message: e.to_string(),
            })
    }

    async fn list_collections(&self) -> Result<Vec<CollectionInfo>> {
        let cursor = self.database.list_collections().await?;
        let specs: Vec<CollectionSpecification> = cursor.try_collect().await?;

        let mut collections: Vec<CollectionInfo> = specs
            .into_iter()
            .map(|spec| CollectionInfo::new(spec.name, collection_kind(&spec.collection_type)))
            .collect();
        collections.sort_by(|a, b| a.name.cmp(&b.name));

        tracing::debug!(
            "Available collections: {}",
            collections
                .iter()
                .map(|c| c.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
        Ok(collections)
    }

    fn source(&self, collection: &str) -> Result<Box<dyn DataSource>> {
        Ok(Box::new(
            MongoSource::new(&self.database, collection).with_mode(self.mode),
        ))
    }
}

fn collection_kind(kind: &CollectionType) -> &'static str {
    match kind {
        CollectionType::Collection => "collection",
        CollectionType::View => "view",
        CollectionType::Timeseries => "timeseries",
        #[allow(unreachable_patterns)]
        _ => "unknown",
    }
}
