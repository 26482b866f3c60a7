//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::error::{Error, Result, ResultExt};
use crate::loader::{
    load_definition, validate_definition, ProbeDefinition, SamplingDefinition, SourceDefinition,
};
use crate::output::{
    collections_message, connection_status, log_message, render_report, schema_message,
};
use crate::schema::{CollectionSchema, SchemaAggregator};
use crate::source::{open_catalog, SampleMode};
use crate::types::LogLevel;
use serde_json::Value;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Check => self.check().await,
            Commands::Collections => self.collections().await,
            Commands::Infer {
                collections,
                sample,
                random,
            } => self.infer(collections, *sample, *random).await,
            Commands::Validate => self.validate(),
        }
    }

    /// Load the probe definition, letting `--uri`/`--file` replace its source
    fn load_definition(&self) -> Result<ProbeDefinition> {
        let flag_source = self.source_from_flags();

        if let Some(path) = &self.cli.definition {
            let mut def = load_definition(path)?;
            if let Some(source) = flag_source {
                def.source = source;
                validate_definition(&def)?;
            }
            return Ok(def);
        }

        let source = flag_source.ok_or_else(|| {
            Error::config("No source specified (use -d, --uri or --file)")
        })?;
        let def = ProbeDefinition {
            name: "cli".to_string(),
            version: crate::VERSION.to_string(),
            source,
            sampling: SamplingDefinition::default(),
            collections: Vec::new(),
        };
        validate_definition(&def)?;
        Ok(def)
    }

    fn source_from_flags(&self) -> Option<SourceDefinition> {
        if let Some(uri) = &self.cli.uri {
            return Some(SourceDefinition::Mongodb {
                uri: uri.clone(),
                database: self.cli.database.clone(),
            });
        }
        self.cli.file.as_ref().map(|path| SourceDefinition::File {
            path: path.clone(),
            format: None,
            collection: None,
        })
    }

    /// Check connection
    async fn check(&self) -> Result<()> {
        let def = self.load_definition()?;
        tracing::info!("Checking connection to {} source '{}'", def.source.kind(), def.name);

        let outcome = match open_catalog(&def.source, def.sampling.mode).await {
            Ok(catalog) => catalog.check().await,
            Err(e) => Err(e),
        };
        self.output_message(&connection_status(outcome.as_ref().map(|_| ())));

        Ok(())
    }

    /// List collections
    async fn collections(&self) -> Result<()> {
        let def = self.load_definition()?;
        let catalog = open_catalog(&def.source, def.sampling.mode).await?;
        let collections = catalog.list_collections().await?;

        self.output_message(&collections_message(&collections));
        Ok(())
    }

    /// Infer schemas
    async fn infer(&self, requested: &[String], sample: Option<usize>, random: bool) -> Result<()> {
        let def = self.load_definition()?;
        let sampling = Self::effective_sampling(def.sampling, sample, random);

        let catalog = open_catalog(&def.source, sampling.mode).await?;

        let names: Vec<String> = if !requested.is_empty() {
            requested.to_vec()
        } else if !def.collections.is_empty() {
            def.collections.clone()
        } else {
            catalog
                .list_collections()
                .await?
                .into_iter()
                .map(|c| c.name)
                .collect()
        };

        if names.is_empty() {
            self.output_message(&log_message(LogLevel::Warn, "No collections to infer"));
            return Ok(());
        }

        let aggregator = SchemaAggregator::new().with_sample_size(sampling.size);
        for name in &names {
            let source = catalog.source(name)?;
            let schema = aggregator
                .build(source.as_ref())
                .await
                .with_context(|| format!("Failed to infer schema for '{name}'"))?;
            self.output_schema(&schema);
        }

        Ok(())
    }

    /// Apply command-line overrides to the definition's sampling settings
    fn effective_sampling(
        mut sampling: SamplingDefinition,
        sample: Option<usize>,
        random: bool,
    ) -> SamplingDefinition {
        if let Some(size) = sample {
            sampling.size = size;
        }
        if random {
            sampling.mode = SampleMode::Random;
        }
        sampling
    }

    /// Validate probe definition
    fn validate(&self) -> Result<()> {
        let path = self
            .cli
            .definition
            .as_ref()
            .ok_or_else(|| Error::config("Definition file not specified (use -d flag)"))?;
        let def = load_definition(path)?;

        self.output_message(&log_message(
            LogLevel::Info,
            format!(
                "Probe '{}' v{} is valid: {} source, sample size {}",
                def.name,
                def.version,
                def.source.kind(),
                def.sampling.size
            ),
        ));

        Ok(())
    }

    /// Output a schema in the selected format
    fn output_schema(&self, schema: &CollectionSchema) {
        match self.cli.format {
            OutputFormat::Report => print!("{}", render_report(schema)),
            OutputFormat::Json | OutputFormat::Pretty => {
                self.output_message(&schema_message(schema));
            }
        }
    }

    /// Output a message
    fn output_message(&self, msg: &Value) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty | OutputFormat::Report => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }
}
