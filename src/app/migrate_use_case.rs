use chrono::{DateTime, Utc};
use std::path::Path;
use tracing::info;

use crate::app::ports::{DocumentSinkPort, DocumentSourcePort};
use crate::config::MigrationConfig;
use crate::error::Result;
use crate::infra::json_file_adapter::{JsonFileSink, JsonFileSource};
use crate::observability::metrics;
use crate::pipeline::migration::{Migration, MigrationOutcome};

/// Load the directory, migrate it, write the result
pub struct MigrateUseCase {
    source: Box<dyn DocumentSourcePort>,
    sink: Box<dyn DocumentSinkPort>,
    migration: Migration,
}

impl MigrateUseCase {
    pub fn new(
        source: Box<dyn DocumentSourcePort>,
        sink: Box<dyn DocumentSinkPort>,
        migration: Migration,
    ) -> Self {
        Self {
            source,
            sink,
            migration,
        }
    }

    /// File-to-file migration configured from `config`
    pub fn for_files(input: &Path, output: &Path, config: &MigrationConfig) -> Self {
        Self::new(
            Box::new(JsonFileSource::new(input)),
            Box::new(JsonFileSink::new(output)),
            Migration::from_config(config),
        )
    }

    /// Nothing is written unless every record migrated.
    pub fn execute(&mut self, now: DateTime<Utc>) -> Result<MigrationOutcome> {
        println!("Starting cooperative data migration...");
        println!("Reading from: {}", self.source.describe());

        let input = self.source.load()?;
        println!("Loaded {} cooperatives", input.cooperatives.len());
        info!(source = %self.source.describe(), records = input.cooperatives.len(), "Loaded input document");

        let outcome = self.migration.run(input.cooperatives, now)?;

        println!("\nWriting enhanced data to: {}", self.sink.describe());
        let bytes = self.sink.write(&outcome.document)?;
        metrics::output::document_written(bytes);

        Ok(outcome)
    }
}
