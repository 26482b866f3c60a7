// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # docshape
//!
//! Structural schema inference for schemaless document collections.
//!
//! ## Features
//!
//! - **Type Classification**: Every BSON value maps to one of eight type tags
//! - **Shape Extraction**: Nested documents and arrays of documents become dotted paths
//! - **Schema Aggregation**: Sampled records merge into field types, unions and required flags
//! - **Sources**: MongoDB collections, JSON/JSONL files, or in-memory records
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use docshape::{build_schema, MongoCatalog, Catalog, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let catalog = MongoCatalog::connect("mongodb://localhost:27017", Some("shop")).await?;
//!     let users = catalog.source("users")?;
//!
//!     let schema = build_schema(users.as_ref(), 100).await?;
//!     for field in &schema.fields {
//!         println!("{} {} {}", field.path, field.field_type, field.required);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       Schema Aggregator                         │
//! │  sample() ∥ count() ∥ list_indexes()  →  merge  →  Schema       │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌────────────────┬─────────────┴─────────┬───────────────────────┐
//! │   Classifier   │   Shape Extractor     │   Data Sources        │
//! ├────────────────┼───────────────────────┼───────────────────────┤
//! │ BSON → tag     │ dotted paths          │ MongoDB               │
//! │ 8 type tags    │ `[]` element paths    │ JSON / JSONL files    │
//! │                │ first element only    │ Memory                │
//! └────────────────┴───────────────────────┴───────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Type classification, shape extraction and schema aggregation
pub mod schema;

/// Record sources (MongoDB, files, memory)
pub mod source;

/// YAML loader for probe definitions
pub mod loader;

/// JSON messages and text reports
pub mod output;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use loader::{load_definition, load_definition_from_str, ProbeDefinition};
pub use schema::{build_schema, CollectionSchema, FieldDescriptor, FieldType, SchemaAggregator, TypeTag};
pub use source::{open_catalog, Catalog, DataSource, FileCatalog, MemorySource, MongoCatalog};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
