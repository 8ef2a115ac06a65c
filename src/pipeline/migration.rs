use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::config::MigrationConfig;
use crate::constants::{MIGRATION_VERSION, SCHEMA_VERSION};
use crate::error::Result;
use crate::observability::metrics;
use crate::pipeline::processing::aggregate::{aggregate, MigrationStatistics, StatisticsBlock};
use crate::pipeline::processing::certification::count_certified;
use crate::pipeline::processing::enhanced::EnhancedCooperative;
use crate::pipeline::processing::enrich::{DefaultEnricher, Enricher};
use crate::types::{Cooperative, RawCooperative};

/// The migrated document written to disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputDocument {
    pub metadata: DocumentMetadata,
    pub cooperatives: Vec<EnhancedCooperative>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    pub country: String,
    pub total_cooperatives: usize,
    pub verified_cooperatives: usize,
    pub last_updated: DateTime<Utc>,
    /// Output schema version
    pub version: String,
    pub migration_version: String,
    pub migration_run_id: Uuid,
    pub source: String,
    pub data_year: i32,
    pub migration_date: DateTime<Utc>,
    pub statistics: StatisticsBlock,
}

/// Document plus the full-precision statistics used for reporting
#[derive(Debug, Clone)]
pub struct MigrationOutcome {
    pub document: OutputDocument,
    pub statistics: MigrationStatistics,
}

/// Labels stamped onto the output document
#[derive(Debug, Clone)]
pub struct DocumentSettings {
    pub country: String,
    pub source: String,
    pub data_year: i32,
    pub progress_interval: usize,
}

impl From<&MigrationConfig> for DocumentSettings {
    fn from(config: &MigrationConfig) -> Self {
        Self {
            country: config.country.clone(),
            source: config.source.clone(),
            data_year: config.data_year,
            progress_interval: config.progress_interval,
        }
    }
}

/// Enhances every cooperative independently, then aggregates.
pub struct Migration<E: Enricher = DefaultEnricher> {
    enricher: E,
    rng: StdRng,
    settings: DocumentSettings,
}

impl Migration<DefaultEnricher> {
    /// Seeded from `config.seed` when set, otherwise from entropy
    pub fn from_config(config: &MigrationConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(DefaultEnricher::new(), rng, DocumentSettings::from(config))
    }
}

impl<E: Enricher> Migration<E> {
    pub fn new(enricher: E, rng: StdRng, settings: DocumentSettings) -> Self {
        Self {
            enricher,
            rng,
            settings,
        }
    }

    /// Run the migration over raw directory records, stamping everything
    /// with `now`. Fails only if a record lacks `id` or `name`.
    #[instrument(skip_all, fields(records = records.len()))]
    pub fn run(&mut self, records: Vec<RawCooperative>, now: DateTime<Utc>) -> Result<MigrationOutcome> {
        let started = Instant::now();
        let total = records.len();

        let mut enhanced = Vec::with_capacity(total);
        for (index, raw) in records.into_iter().enumerate() {
            let position = index + 1;
            if reports_progress(position, self.settings.progress_interval) {
                println!("Processing cooperative {}/{}...", position, total);
                info!(position, total, "Migration progress");
            }

            let cooperative = Cooperative::from_raw(raw)?;
            let record = self.enricher.enrich(&cooperative, now, &mut self.rng);

            metrics::enrichment::record_enhanced(
                record.security.level,
                record.risk_assessment.overall_risk,
                record.security.overall_score,
                record.sustainability.esg_score,
                record.compliance.certifications.len(),
                count_certified(&record.compliance.certifications),
            );
            enhanced.push(record);
        }

        let statistics = aggregate(&enhanced);
        let run_id = uuid::Builder::from_random_bytes(self.rng.gen()).into_uuid();

        let document = OutputDocument {
            metadata: DocumentMetadata {
                country: self.settings.country.clone(),
                total_cooperatives: statistics.total,
                verified_cooperatives: statistics.verified,
                last_updated: now,
                version: SCHEMA_VERSION.to_string(),
                migration_version: MIGRATION_VERSION.to_string(),
                migration_run_id: run_id,
                source: self.settings.source.clone(),
                data_year: self.settings.data_year,
                migration_date: now,
                statistics: StatisticsBlock::from(&statistics),
            },
            cooperatives: enhanced,
        };

        let elapsed = started.elapsed().as_secs_f64();
        metrics::run::completed(total, elapsed);
        info!(
            run_id = %run_id,
            total = statistics.total,
            verified = statistics.verified,
            certifications = statistics.total_certifications,
            elapsed_secs = elapsed,
            "Migration complete"
        );

        Ok(MigrationOutcome {
            document,
            statistics,
        })
    }
}

/// Whether the 1-based `position` gets a progress line. An interval of 0
/// reports every record.
fn reports_progress(position: usize, interval: usize) -> bool {
    position % interval.max(1) == 0
}
