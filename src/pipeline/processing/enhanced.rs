//! Output schema (v2) for an enhanced cooperative.
//!
//! Field names serialize in camelCase to match the platform's JSON schema
//! (`schemas/cooperatives_enhanced.v2.json`). Many fields are placeholders
//! that later data collection fills in; they are emitted with empty values so
//! every record has the same shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::pipeline::processing::certification::Certification;
use crate::pipeline::processing::risk::{RiskFactor, RiskLevel};
use crate::pipeline::processing::security::SecurityLevel;
use crate::pipeline::processing::traceability::TraceabilityRecord;
use crate::pipeline::reference::Coordinates;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancedCooperative {
    pub id: Value,
    pub basic_info: BasicInfo,
    pub operations: Operations,
    pub contact: ContactInfo,
    pub security: SecurityProfile,
    pub compliance: Compliance,
    pub sustainability: Sustainability,
    pub supply_chain: SupplyChain,
    pub financial_health: FinancialHealth,
    pub risk_assessment: RiskAssessment,
    /// Prior entries first, enhancement entry last
    pub traceability: Vec<TraceabilityRecord>,
    pub ermits_integration: ErmitsIntegration,
    pub metadata: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicInfo {
    pub name: String,
    pub acronym: String,
    pub region: String,
    pub departement: String,
    pub commune: String,
    pub coordinates: Coordinates,
    pub registration_number: String,
    pub founded_year: i32,
    pub member_count: u32,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operations {
    pub secteur: String,
    pub main_crops: Vec<String>,
    pub production_capacity: Quantity,
    pub activities: Vec<String>,
    pub certified_organic: bool,
    pub irrigation_method: String,
}

/// Annual amount with a unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    pub annual: u64,
    pub unit: String,
}

impl Quantity {
    pub fn zero(unit: &str) -> Self {
        Self {
            annual: 0,
            unit: unit.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    pub president: String,
    pub phone: String,
    pub alternate_phone: String,
    pub email: String,
    pub website: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityProfile {
    pub overall_score: u8,
    pub level: SecurityLevel,
    pub last_assessment: Option<DateTime<Utc>>,
    pub next_assessment: Option<DateTime<Utc>>,
    pub iot_devices: IotDevices,
    pub data_protection: DataProtection,
    pub incident_history: Vec<Value>,
    pub security_training: SecurityTraining,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IotDevices {
    pub count: u32,
    pub secured: u32,
    pub vulnerabilities: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataProtection {
    pub level: String,
    pub data_types: Vec<String>,
    pub encryption: bool,
    pub backup_frequency: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityTraining {
    pub last_date: Option<DateTime<Utc>>,
    pub next_scheduled: Option<DateTime<Utc>>,
    pub completion_rate: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Compliance {
    pub certifications: Vec<Certification>,
    /// Percentage of listed certifications that are held
    pub compliance_score: u8,
    pub regulatory_requirements: RegulatoryRequirements,
    pub last_audit_date: Option<DateTime<Utc>>,
    pub next_audit_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegulatoryRequirements {
    pub food_safety: String,
    pub environmental_permits: String,
    pub labor_standards: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sustainability {
    pub esg_score: u8,
    pub environmental: Environmental,
    pub social: Social,
    pub governance: Governance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Environmental {
    pub carbon_footprint: CarbonFootprint,
    pub water_usage: WaterUsage,
    pub soil_health: SoilHealth,
    pub biodiversity: Biodiversity,
    pub sustainable_practices: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarbonFootprint {
    pub annual: u64,
    pub unit: String,
    pub last_calculated: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterUsage {
    pub annual: u64,
    pub unit: String,
    pub efficiency: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoilHealth {
    pub score: u8,
    pub erosion_control: bool,
    pub organic_matter_content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Biodiversity {
    pub protected_areas: u32,
    pub native_plants: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Social {
    pub fair_wages: bool,
    pub child_labor_free: bool,
    pub gender_equality: String,
    pub community_investment: u64,
    pub worker_safety: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Governance {
    pub transparency_score: u8,
    pub financial_audits: bool,
    pub anticorruption_policies: bool,
    pub board_diversity: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplyChain {
    pub upstream_partners: Vec<String>,
    pub downstream_partners: Vec<String>,
    pub traceability_level: String,
    pub blockchain_enabled: bool,
    pub quality_metrics: QualityMetrics,
    pub certified_supply_chain: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityMetrics {
    pub average_grade: String,
    pub rejection_rate: u32,
    pub on_time_delivery: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialHealth {
    pub credit_rating: String,
    pub annual_revenue: u64,
    pub debt_to_equity: u32,
    pub payment_history: String,
    pub financial_stability: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub overall_risk: RiskLevel,
    pub risk_factors: Vec<RiskFactor>,
    pub mitigation_plans: Vec<String>,
    pub last_assessment_date: DateTime<Utc>,
    pub next_review_date: DateTime<Utc>,
}

/// Links to the sibling ERMITS products; nothing is linked at migration time
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErmitsIntegration {
    pub vendor_soluce_linked: bool,
    pub impact_soluce_linked: bool,
    pub cyber_caution_monitored: bool,
    pub steel_assessed: bool,
    pub last_sync_date: Option<DateTime<Utc>>,
}
