//! Schema aggregation over a sample of records

use super::extract::{extract_shape, flatten};
use super::types::{root_key, CollectionSchema, FieldDescriptor, FieldType, TypeTag};
use crate::error::Result;
use crate::source::DataSource;
use mongodb::bson::{Bson, Document};
use std::collections::{HashMap, HashSet};

/// Records read for shape inference when no size is given
pub const DEFAULT_SAMPLE_SIZE: usize = 100;

/// Builds a [`CollectionSchema`] from a bounded sample of a data source
#[derive(Debug, Clone)]
pub struct SchemaAggregator {
    /// Maximum records read for inference
    sample_size: usize,
}

impl Default for SchemaAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaAggregator {
    /// Create an aggregator with the default sample size
    pub fn new() -> Self {
        Self {
            sample_size: DEFAULT_SAMPLE_SIZE,
        }
    }

    /// Set the sample size (0 = infer nothing, still count)
    #[must_use]
    pub fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size;
        self
    }

    /// Configured sample size
    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    /// Sample the source and build its schema
    ///
    /// Sample, count and index requests are issued concurrently. The first
    /// one to fail aborts the call and its error is returned as is.
    pub async fn build(&self, source: &dyn DataSource) -> Result<CollectionSchema> {
        tracing::debug!(
            "Inferring schema for '{}' (sample size {})",
            source.name(),
            self.sample_size
        );

        let sample = async {
            if self.sample_size == 0 {
                Ok(Vec::new())
            } else {
                source.sample(self.sample_size).await
            }
        };

        let (mut records, total_count, indexes) =
            tokio::try_join!(sample, source.count(), source.list_indexes())?;
        records.truncate(self.sample_size);

        let schema = self.merge(source.name(), &records, total_count, indexes);
        tracing::debug!(
            "Inferred {} fields for '{}' from {} of {} records",
            schema.fields.len(),
            schema.name,
            schema.sampled,
            schema.total_count
        );
        Ok(schema)
    }

    /// Merge already-sampled records into a schema
    pub fn merge(
        &self,
        name: impl Into<String>,
        records: &[Bson],
        total_count: u64,
        indexes: Vec<Document>,
    ) -> CollectionSchema {
        let extracted: Vec<Vec<FieldDescriptor>> =
            records.iter().map(|r| extract_shape(r, "")).collect();

        // Path -> observed tags, plus the first structure seen for the path
        let mut order: Vec<&str> = Vec::new();
        let mut observed: HashMap<&str, Vec<TypeTag>> = HashMap::new();
        let mut structure: HashMap<&str, &Vec<FieldDescriptor>> = HashMap::new();

        for fields in &extracted {
            for field in flatten(fields) {
                let path = field.path.as_str();
                let tags = observed.entry(path).or_insert_with(|| {
                    order.push(path);
                    Vec::new()
                });
                for tag in field.field_type.tags() {
                    if !tags.contains(tag) {
                        tags.push(*tag);
                    }
                }
                if let Some(children) = field.children.as_ref().filter(|c| !c.is_empty()) {
                    structure.entry(path).or_insert(children);
                }
            }
        }

        let required = required_paths(records, &order);

        let fields = order
            .iter()
            .filter_map(|path| {
                let field_type = observed.get(path).and_then(|t| FieldType::from_tags(t))?;
                Some(FieldDescriptor {
                    path: (*path).to_string(),
                    field_type,
                    required: required.contains(path),
                    children: structure.get(path).map(|c| (*c).clone()),
                })
            })
            .collect();

        CollectionSchema {
            name: name.into(),
            fields,
            total_count,
            sampled: records.len(),
            indexes,
        }
    }
}

/// Paths whose root key is present in every record
///
/// Presence is gathered per record first, then folded; only the root
/// segment is checked, so `address.city` passes wherever `address` exists.
fn required_paths<'a>(records: &[Bson], paths: &[&'a str]) -> HashSet<&'a str> {
    let record_keys: Vec<HashSet<&str>> = records.iter().map(top_level_keys).collect();

    let presence: HashMap<&str, Vec<bool>> = paths
        .iter()
        .map(|path| {
            let root = root_key(path);
            let seen = record_keys.iter().map(|keys| keys.contains(root)).collect();
            (*path, seen)
        })
        .collect();

    presence
        .into_iter()
        .filter(|(_, seen)| seen.iter().all(|present| *present))
        .map(|(path, _)| path)
        .collect()
}

fn top_level_keys(record: &Bson) -> HashSet<&str> {
    match record {
        Bson::Document(doc) => doc.keys().map(String::as_str).collect(),
        _ => HashSet::new(),
    }
}

/// Build a schema for `source` from at most `sample_size` records
pub async fn build_schema(source: &dyn DataSource, sample_size: usize) -> Result<CollectionSchema> {
    SchemaAggregator::new()
        .with_sample_size(sample_size)
        .build(source)
        .await
}
