//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Infer structural schemas from schemaless document collections
#[derive(Parser, Debug)]
#[command(name = "docshape")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Probe definition file (YAML)
    #[arg(short, long, global = true)]
    pub definition: Option<PathBuf>,

    /// MongoDB connection URI (instead of a definition file)
    #[arg(long, global = true, conflicts_with = "file")]
    pub uri: Option<String>,

    /// Database name (defaults to the URI's, then "test")
    #[arg(long, global = true, requires = "uri")]
    pub database: Option<String>,

    /// JSON/JSONL file or directory (instead of a definition file)
    #[arg(long, global = true)]
    pub file: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Test connection to the source
    Check,

    /// List available collections
    Collections,

    /// Infer collection schemas
    Infer {
        /// Collections to infer (repeatable; default = definition list, else all)
        #[arg(short, long = "collection")]
        collections: Vec<String>,

        /// Records sampled per collection (overrides the definition)
        #[arg(long)]
        sample: Option<usize>,

        /// Draw a random sample instead of the first records
        #[arg(long)]
        random: bool,
    },

    /// Validate the probe definition
    Validate,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one message per line)
    Json,
    /// Pretty-printed JSON
    Pretty,
    /// Human-readable text report
    Report,
}
