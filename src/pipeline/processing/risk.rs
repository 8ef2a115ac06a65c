use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::pipeline::processing::certification::Certification;

/// Scores below this raise a high-severity security factor
const LOW_SECURITY_THRESHOLD: u8 = 50;
/// Chance of flagging an operational risk, independent of the record
const OPERATIONAL_RISK_PROBABILITY: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    Security,
    Compliance,
    Operational,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskSeverity {
    High,
    Medium,
}

/// Overall risk classification of a cooperative
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::High => "high",
            RiskLevel::Medium => "medium",
            RiskLevel::Low => "low",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactor {
    pub category: RiskCategory,
    pub severity: RiskSeverity,
    pub description: String,
}

impl RiskFactor {
    fn new(category: RiskCategory, severity: RiskSeverity, description: &str) -> Self {
        Self {
            category,
            severity,
            description: description.to_string(),
        }
    }
}

/// Risk factors for a cooperative, in security, compliance, operational order.
pub fn generate_risk_factors<R: Rng + ?Sized>(
    security_score: u8,
    certifications: &[Certification],
    rng: &mut R,
) -> Vec<RiskFactor> {
    let mut factors = Vec::new();

    if security_score < LOW_SECURITY_THRESHOLD {
        factors.push(RiskFactor::new(
            RiskCategory::Security,
            RiskSeverity::High,
            "Low security score indicates potential vulnerabilities",
        ));
    }

    if !certifications.iter().any(Certification::is_certified) {
        factors.push(RiskFactor::new(
            RiskCategory::Compliance,
            RiskSeverity::Medium,
            "No active certifications",
        ));
    }

    if rng.gen::<f64>() < OPERATIONAL_RISK_PROBABILITY {
        factors.push(RiskFactor::new(
            RiskCategory::Operational,
            RiskSeverity::Medium,
            "Limited product diversification",
        ));
    }

    factors
}

/// High if any factor is high; medium if more than one factor is medium;
/// low otherwise (including no factors at all).
pub fn determine_overall_risk(factors: &[RiskFactor]) -> RiskLevel {
    let high = factors.iter().filter(|f| f.severity == RiskSeverity::High).count();
    let medium = factors.iter().filter(|f| f.severity == RiskSeverity::Medium).count();

    if high > 0 {
        RiskLevel::High
    } else if medium > 1 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}
