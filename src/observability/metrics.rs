//! Metrics for the migration run
//!
//! Recording goes through the `metrics` facade and is a no-op until a
//! recorder is installed with [`init`]. The CLI installs a Prometheus
//! recorder and can dump the text exposition after a run.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::fmt;
use tracing::info;

use crate::error::{MigrationError, Result};

/// All metric names used by the migration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    // Enrichment
    RecordsEnhanced,
    SecurityLevelAssigned,
    SecurityScore,
    EsgScore,
    CertificationsGenerated,
    CertificationsHeld,
    OverallRiskAssigned,

    // Run
    RunDuration,
    RunRecords,

    // Output
    DocumentsWritten,
    DocumentBytes,
}

impl MetricName {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::RecordsEnhanced => "coop_migrate_records_enhanced_total",
            MetricName::SecurityLevelAssigned => "coop_migrate_security_level_total",
            MetricName::SecurityScore => "coop_migrate_security_score",
            MetricName::EsgScore => "coop_migrate_esg_score",
            MetricName::CertificationsGenerated => "coop_migrate_certifications_generated_total",
            MetricName::CertificationsHeld => "coop_migrate_certifications_held_total",
            MetricName::OverallRiskAssigned => "coop_migrate_overall_risk_total",
            MetricName::RunDuration => "coop_migrate_run_duration_seconds",
            MetricName::RunRecords => "coop_migrate_run_records",
            MetricName::DocumentsWritten => "coop_migrate_documents_written_total",
            MetricName::DocumentBytes => "coop_migrate_document_bytes",
        }
    }

    pub fn all_metrics() -> impl Iterator<Item = MetricName> {
        use MetricName::*;
        [
            RecordsEnhanced,
            SecurityLevelAssigned,
            SecurityScore,
            EsgScore,
            CertificationsGenerated,
            CertificationsHeld,
            OverallRiskAssigned,
            RunDuration,
            RunRecords,
            DocumentsWritten,
            DocumentBytes,
        ]
        .into_iter()
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Install the Prometheus recorder. Call at most once per process.
pub fn init() -> Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| MigrationError::Metrics(format!("Failed to install Prometheus recorder: {}", e)))?;
    info!("Metrics recorder installed");
    Ok(handle)
}

pub mod enrichment {
    use super::MetricName;
    use crate::pipeline::processing::risk::RiskLevel;
    use crate::pipeline::processing::security::SecurityLevel;

    /// Record the outcome of enhancing one cooperative
    pub fn record_enhanced(
        level: SecurityLevel,
        overall_risk: RiskLevel,
        security_score: u8,
        esg_score: u8,
        certifications: usize,
        held: usize,
    ) {
        ::metrics::counter!(MetricName::RecordsEnhanced.as_str()).increment(1);
        ::metrics::counter!(MetricName::SecurityLevelAssigned.as_str(), "level" => level.as_str())
            .increment(1);
        ::metrics::counter!(MetricName::OverallRiskAssigned.as_str(), "risk" => overall_risk.as_str())
            .increment(1);
        ::metrics::histogram!(MetricName::SecurityScore.as_str()).record(f64::from(security_score));
        ::metrics::histogram!(MetricName::EsgScore.as_str()).record(f64::from(esg_score));
        ::metrics::counter!(MetricName::CertificationsGenerated.as_str()).increment(certifications as u64);
        ::metrics::counter!(MetricName::CertificationsHeld.as_str()).increment(held as u64);
    }
}

pub mod run {
    use super::MetricName;

    pub fn completed(records: usize, duration_secs: f64) {
        ::metrics::gauge!(MetricName::RunRecords.as_str()).set(records as f64);
        ::metrics::histogram!(MetricName::RunDuration.as_str()).record(duration_secs);
    }
}

pub mod output {
    use super::MetricName;

    pub fn document_written(bytes: usize) {
        ::metrics::counter!(MetricName::DocumentsWritten.as_str()).increment(1);
        ::metrics::histogram!(MetricName::DocumentBytes.as_str()).record(bytes as f64);
    }
}
