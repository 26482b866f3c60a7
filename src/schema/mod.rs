//! Schema inference module
//!
//! Infers a structural schema from a sample of schemaless records.
//!
//! # Features
//!
//! - **Type Classification**: One closed [`TypeTag`] per value
//! - **Shape Extraction**: Dotted paths for nesting, `[]` for array elements
//! - **Schema Merging**: Union of paths and of observed types per path
//! - **Required Detection**: A path is required when its root key is in every sampled record
//! - **Array Element Shapes**: Taken from the first element of each array

mod aggregate;
mod classify;
mod extract;
mod types;

pub use aggregate::{build_schema, SchemaAggregator, DEFAULT_SAMPLE_SIZE};
pub use classify::{classify, classify_opt};
pub use extract::{extract_document, extract_shape, flatten};
pub use types::{CollectionSchema, FieldDescriptor, FieldType, TypeTag};
