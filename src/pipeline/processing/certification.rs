use chrono::{DateTime, Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::pipeline::reference::{CertificationType, CERTIFICATION_BODIES};

/// Share of the security score that becomes the per-type inclusion probability
const INCLUSION_FACTOR: f64 = 0.4;
/// Scores above this use the favourable status weights
const HIGH_SCORE_THRESHOLD: u8 = 70;

const HIGH_SCORE_STATUS_WEIGHTS: [(CertificationStatus, f64); 4] = [
    (CertificationStatus::Certified, 0.4),
    (CertificationStatus::Pending, 0.2),
    (CertificationStatus::InProgress, 0.2),
    (CertificationStatus::NotStarted, 0.2),
];

const LOW_SCORE_STATUS_WEIGHTS: [(CertificationStatus, f64); 4] = [
    (CertificationStatus::Certified, 0.2),
    (CertificationStatus::Pending, 0.3),
    (CertificationStatus::InProgress, 0.3),
    (CertificationStatus::NotStarted, 0.2),
];

// Day ranges (inclusive) for simulated dates
const EXPIRY_DAYS: (i64, i64) = (180, 730);
const APPLICATION_DAYS_AGO: (i64, i64) = (30, 180);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CertificationStatus {
    Certified,
    Pending,
    InProgress,
    NotStarted,
}

/// A simulated certification. Only certified entries carry an expiry date and
/// issuing body; only pending entries carry an application date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certification {
    #[serde(rename = "type")]
    pub certification_type: CertificationType,
    pub status: CertificationStatus,
    pub application_date: Option<DateTime<Utc>>,
    pub expiry_date: Option<DateTime<Utc>>,
    pub certification_body: String,
}

impl Certification {
    pub fn is_certified(&self) -> bool {
        self.status == CertificationStatus::Certified
    }
}

pub fn count_certified(certifications: &[Certification]) -> usize {
    certifications.iter().filter(|c| c.is_certified()).count()
}

/// Simulate the certifications held by a cooperative. Higher security scores
/// make every certification type more likely to appear. Entries follow
/// `CertificationType::ALL` order.
pub fn generate_certifications<R: Rng + ?Sized>(
    security_score: u8,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<Certification> {
    let inclusion_probability = f64::from(security_score) / 100.0 * INCLUSION_FACTOR;
    let weights = if security_score > HIGH_SCORE_THRESHOLD {
        &HIGH_SCORE_STATUS_WEIGHTS
    } else {
        &LOW_SCORE_STATUS_WEIGHTS
    };

    let mut certifications = Vec::new();
    for certification_type in CertificationType::ALL {
        if rng.gen::<f64>() >= inclusion_probability {
            continue;
        }

        let status = weights
            .choose_weighted(rng, |(_, weight)| *weight)
            .map(|(status, _)| *status)
            .unwrap_or(CertificationStatus::NotStarted);

        let mut certification = Certification {
            certification_type,
            status,
            application_date: None,
            expiry_date: None,
            certification_body: String::new(),
        };

        match status {
            CertificationStatus::Certified => {
                let days = rng.gen_range(EXPIRY_DAYS.0..=EXPIRY_DAYS.1);
                certification.expiry_date = Some(now + Duration::days(days));
                let body = CERTIFICATION_BODIES.choose(rng).copied().unwrap_or_default();
                certification.certification_body = body.to_string();
            }
            CertificationStatus::Pending => {
                let days = rng.gen_range(APPLICATION_DAYS_AGO.0..=APPLICATION_DAYS_AGO.1);
                certification.application_date = Some(now - Duration::days(days));
            }
            CertificationStatus::InProgress | CertificationStatus::NotStarted => {}
        }

        certifications.push(certification);
    }

    certifications
}
