use serde::{Deserialize, Serialize};

use crate::constants::STATUS_VERIFIED;
use crate::pipeline::processing::certification::count_certified;
use crate::pipeline::processing::enhanced::EnhancedCooperative;
use crate::pipeline::processing::security::SecurityLevel;

/// Number of cooperatives per security level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityDistribution {
    pub excellent: usize,
    pub good: usize,
    pub medium: usize,
    pub poor: usize,
    pub critical: usize,
}

impl SecurityDistribution {
    pub fn record(&mut self, level: SecurityLevel) {
        *self.slot(level) += 1;
    }

    pub fn count(&self, level: SecurityLevel) -> usize {
        match level {
            SecurityLevel::Excellent => self.excellent,
            SecurityLevel::Good => self.good,
            SecurityLevel::Medium => self.medium,
            SecurityLevel::Poor => self.poor,
            SecurityLevel::Critical => self.critical,
        }
    }

    pub fn total(&self) -> usize {
        SecurityLevel::ALL.iter().map(|level| self.count(*level)).sum()
    }

    fn slot(&mut self, level: SecurityLevel) -> &mut usize {
        match level {
            SecurityLevel::Excellent => &mut self.excellent,
            SecurityLevel::Good => &mut self.good,
            SecurityLevel::Medium => &mut self.medium,
            SecurityLevel::Poor => &mut self.poor,
            SecurityLevel::Critical => &mut self.critical,
        }
    }
}

/// Corpus-wide statistics at full precision
#[derive(Debug, Clone, PartialEq)]
pub struct MigrationStatistics {
    pub total: usize,
    pub verified: usize,
    pub average_security_score: f64,
    pub average_esg_score: f64,
    /// Held certifications across all cooperatives
    pub total_certifications: usize,
    pub security_distribution: SecurityDistribution,
}

impl MigrationStatistics {
    /// Share of cooperatives at `level`, in percent; 0 for an empty corpus
    pub fn percentage(&self, level: SecurityLevel) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.security_distribution.count(level) as f64 / self.total as f64 * 100.0
    }
}

/// Statistics block of the output document; averages rounded to 2 places
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsBlock {
    pub average_security_score: f64,
    #[serde(rename = "averageESGScore")]
    pub average_esg_score: f64,
    pub total_certifications: usize,
    pub security_distribution: SecurityDistribution,
}

impl From<&MigrationStatistics> for StatisticsBlock {
    fn from(stats: &MigrationStatistics) -> Self {
        Self {
            average_security_score: round2(stats.average_security_score),
            average_esg_score: round2(stats.average_esg_score),
            total_certifications: stats.total_certifications,
            security_distribution: stats.security_distribution,
        }
    }
}

pub fn aggregate(cooperatives: &[EnhancedCooperative]) -> MigrationStatistics {
    let mut distribution = SecurityDistribution::default();
    let mut verified = 0;
    let mut security_sum = 0u64;
    let mut esg_sum = 0u64;
    let mut total_certifications = 0;

    for cooperative in cooperatives {
        distribution.record(cooperative.security.level);
        if cooperative.basic_info.status == STATUS_VERIFIED {
            verified += 1;
        }
        security_sum += u64::from(cooperative.security.overall_score);
        esg_sum += u64::from(cooperative.sustainability.esg_score);
        total_certifications += count_certified(&cooperative.compliance.certifications);
    }

    let total = cooperatives.len();
    let mean = |sum: u64| if total == 0 { 0.0 } else { sum as f64 / total as f64 };

    MigrationStatistics {
        total,
        verified,
        average_security_score: mean(security_sum),
        average_esg_score: mean(esg_sum),
        total_certifications,
        security_distribution: distribution,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
