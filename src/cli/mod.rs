//! CLI module
//!
//! Command-line interface for inferring schemas.
//!
//! # Commands
//!
//! - `check` - Test connection to the source
//! - `collections` - List available collections
//! - `infer` - Infer collection schemas
//! - `validate` - Validate a probe definition

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
