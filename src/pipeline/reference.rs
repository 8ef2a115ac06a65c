//! Reference data used during enhancement.
//!
//! All tables are immutable and built at most once per process.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Approximate centre of an administrative region
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Region used when a cooperative's region is not in the table
pub const DEFAULT_REGION: &str = "ABIDJAN";

/// Region centres keyed by upper-cased region name
pub static REGION_COORDINATES: Lazy<HashMap<&'static str, Coordinates>> = Lazy::new(|| {
    HashMap::from([
        ("AGNEBY-TIASSA", Coordinates::new(5.9275, -4.2141)),
        ("ABIDJAN", Coordinates::new(5.3600, -4.0083)),
        ("BAS-SASSANDRA", Coordinates::new(5.3000, -6.6500)),
        ("COMOE", Coordinates::new(6.6500, -3.4833)),
        ("DENGUELE", Coordinates::new(9.5000, -7.5500)),
        ("GÔHÉ-DJIBOUA", Coordinates::new(5.7500, -5.5000)),
        ("LACS", Coordinates::new(6.5000, -5.0000)),
        ("LAGUNES", Coordinates::new(5.5000, -4.5000)),
        ("MONTAGNES", Coordinates::new(7.4000, -7.5500)),
        ("SASSANDRA-MARAHOUE", Coordinates::new(6.8500, -6.4000)),
        ("SAVANES", Coordinates::new(9.5000, -5.5000)),
        ("VALLÉE DU BANDAMA", Coordinates::new(8.0000, -5.0000)),
        ("WOROBA", Coordinates::new(8.2000, -6.9000)),
        ("YAMOUSSOUKRO", Coordinates::new(6.8205, -5.2767)),
        ("ZANZAN", Coordinates::new(8.5000, -3.5000)),
    ])
});

/// Certification schemes a cooperative may hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CertificationType {
    #[serde(rename = "GlobalGAP")]
    GlobalGap,
    #[serde(rename = "USDA_Organic")]
    UsdaOrganic,
    #[serde(rename = "Fair_Trade")]
    FairTrade,
    #[serde(rename = "Rainforest_Alliance")]
    RainforestAlliance,
    #[serde(rename = "ISO_22000")]
    Iso22000,
    #[serde(rename = "HACCP")]
    Haccp,
}

impl CertificationType {
    /// Iteration order used by the certification generator
    pub const ALL: [CertificationType; 6] = [
        CertificationType::GlobalGap,
        CertificationType::UsdaOrganic,
        CertificationType::FairTrade,
        CertificationType::RainforestAlliance,
        CertificationType::Iso22000,
        CertificationType::Haccp,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CertificationType::GlobalGap => "GlobalGAP",
            CertificationType::UsdaOrganic => "USDA_Organic",
            CertificationType::FairTrade => "Fair_Trade",
            CertificationType::RainforestAlliance => "Rainforest_Alliance",
            CertificationType::Iso22000 => "ISO_22000",
            CertificationType::Haccp => "HACCP",
        }
    }
}

impl fmt::Display for CertificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bodies that issue certifications
pub const CERTIFICATION_BODIES: [&str; 4] = ["ECOCERT", "Control Union", "SGS", "Bureau Veritas"];

/// Activity keyword (matched case-insensitively) and its canonical label.
/// Parsed activities follow this order, not the input order.
pub const ACTIVITY_KEYWORDS: [(&str, &str); 7] = [
    ("PRODUCTION", "Production"),
    ("COLLECTE", "Collection"),
    ("ACHAT", "Purchase"),
    ("COMMERCIALISATION", "Marketing"),
    ("STOCKAGE", "Storage"),
    ("TRANSPORT", "Transport"),
    ("TRANSFORMATION", "Processing"),
];
