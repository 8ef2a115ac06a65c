use crate::pipeline::processing::certification::{count_certified, Certification};

const SECURITY_WEIGHT: f64 = 0.6;
const CERTIFIED_BONUS: f64 = 10.0;

/// ESG score: 60% of the security score plus 10 points per held
/// certification, truncated and clamped to 0..=100. A placeholder until real
/// ESG assessments exist.
pub fn calculate_esg_score(security_score: u8, certifications: &[Certification]) -> u8 {
    let base = f64::from(security_score) * SECURITY_WEIGHT;
    let bonus = count_certified(certifications) as f64 * CERTIFIED_BONUS;
    (base + bonus).trunc().clamp(0.0, 100.0) as u8
}
