use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::Cooperative;

const BASE_SCORE: i32 = 50;
const VERIFIED_BONUS: i32 = 15;
const PHONE_BONUS: i32 = 5;
const CONTACT_BONUS: i32 = 5;
/// Inclusive bounds of the simulated real-world variation
const VARIATION_MIN: i32 = -10;
const VARIATION_MAX: i32 = 20;

/// Bucketed classification of a security score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecurityLevel {
    Excellent,
    Good,
    Medium,
    Poor,
    Critical,
}

impl SecurityLevel {
    /// Reporting order, best first
    pub const ALL: [SecurityLevel; 5] = [
        SecurityLevel::Excellent,
        SecurityLevel::Good,
        SecurityLevel::Medium,
        SecurityLevel::Poor,
        SecurityLevel::Critical,
    ];

    /// 86-100 excellent, 71-85 good, 51-70 medium, 31-50 poor, 0-30 critical
    pub fn from_score(score: u8) -> Self {
        match score {
            86.. => SecurityLevel::Excellent,
            71..=85 => SecurityLevel::Good,
            51..=70 => SecurityLevel::Medium,
            31..=50 => SecurityLevel::Poor,
            _ => SecurityLevel::Critical,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SecurityLevel::Excellent => "excellent",
            SecurityLevel::Good => "good",
            SecurityLevel::Medium => "medium",
            SecurityLevel::Poor => "poor",
            SecurityLevel::Critical => "critical",
        }
    }

    /// Capitalized label for console output
    pub fn label(&self) -> &'static str {
        match self {
            SecurityLevel::Excellent => "Excellent",
            SecurityLevel::Good => "Good",
            SecurityLevel::Medium => "Medium",
            SecurityLevel::Poor => "Poor",
            SecurityLevel::Critical => "Critical",
        }
    }
}

impl fmt::Display for SecurityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Initial security score from the information available in the directory,
/// perturbed to simulate real-world variation. Always within 0..=100.
pub fn calculate_security_score<R: Rng + ?Sized>(cooperative: &Cooperative, rng: &mut R) -> u8 {
    let mut score = BASE_SCORE;

    if cooperative.is_verified() {
        score += VERIFIED_BONUS;
    }
    if !cooperative.phone.is_empty() {
        score += PHONE_BONUS;
    }
    if !cooperative.contact.is_empty() {
        score += CONTACT_BONUS;
    }

    score += rng.gen_range(VARIATION_MIN..=VARIATION_MAX);

    score.clamp(0, 100) as u8
}
