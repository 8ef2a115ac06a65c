use chrono::{DateTime, Duration, SecondsFormat, Utc};
use rand::RngCore;
use serde_json::{Map, Value};
use tracing::debug;

use crate::constants::{
    DATA_QUALITY_ENHANCED, MIGRATION_VERSION, REVIEW_INTERVAL_DAYS, SCHEMA_VERSION,
    VERIFICATION_PENDING_REVIEW,
};
use crate::pipeline::processing::activities::parse_activities;
use crate::pipeline::processing::certification::{
    count_certified, generate_certifications, Certification,
};
use crate::pipeline::processing::enhanced::*;
use crate::pipeline::processing::esg::calculate_esg_score;
use crate::pipeline::processing::extract::{extract_founded_year, split_phone_numbers};
use crate::pipeline::processing::geo::resolve_coordinates;
use crate::pipeline::processing::risk::{determine_overall_risk, generate_risk_factors};
use crate::pipeline::processing::security::{calculate_security_score, SecurityLevel};
use crate::pipeline::processing::traceability::extend_traceability;
use crate::pipeline::reference::CertificationType;
use crate::types::Cooperative;

/// Turns a directory record into the enhanced schema.
///
/// Randomness and the clock are passed in so a whole run can be replayed
/// from a seed and every timestamp in a run agrees.
pub trait Enricher {
    fn enrich(
        &self,
        cooperative: &Cooperative,
        now: DateTime<Utc>,
        rng: &mut dyn RngCore,
    ) -> EnhancedCooperative;
}

/// Enricher producing the v2 platform schema
pub struct DefaultEnricher {
    /// Time until the next security assessment and risk review
    pub review_interval: Duration,
}

impl Default for DefaultEnricher {
    fn default() -> Self {
        Self {
            review_interval: Duration::days(REVIEW_INTERVAL_DAYS),
        }
    }
}

impl DefaultEnricher {
    pub fn new() -> Self {
        Self::default()
    }

    fn security_profile(&self, score: u8, now: DateTime<Utc>) -> SecurityProfile {
        let assessed = score > 50;
        SecurityProfile {
            overall_score: score,
            level: SecurityLevel::from_score(score),
            last_assessment: assessed.then_some(now),
            next_assessment: assessed.then(|| now + self.review_interval),
            iot_devices: IotDevices::default(),
            data_protection: DataProtection {
                level: if assessed { "basic" } else { "unknown" }.to_string(),
                data_types: vec!["farmer_records".to_string(), "production_data".to_string()],
                encryption: score > 70,
                backup_frequency: if score > 60 { "monthly" } else { "" }.to_string(),
            },
            incident_history: Vec::new(),
            security_training: SecurityTraining::default(),
        }
    }

    fn compliance(&self, score: u8, certifications: Vec<Certification>) -> Compliance {
        Compliance {
            compliance_score: compliance_score(&certifications),
            certifications,
            regulatory_requirements: RegulatoryRequirements {
                food_safety: if score > 70 { "compliant" } else { "pending" }.to_string(),
                environmental_permits: "pending".to_string(),
                labor_standards: "compliant".to_string(),
            },
            last_audit_date: None,
            next_audit_date: None,
        }
    }

    fn sustainability(&self, esg_score: u8) -> Sustainability {
        Sustainability {
            esg_score,
            environmental: Environmental {
                carbon_footprint: CarbonFootprint {
                    annual: 0,
                    unit: "tCO2e".to_string(),
                    last_calculated: None,
                },
                water_usage: WaterUsage {
                    annual: 0,
                    unit: "m³".to_string(),
                    efficiency: String::new(),
                },
                soil_health: SoilHealth::default(),
                biodiversity: Biodiversity::default(),
                sustainable_practices: Vec::new(),
            },
            social: Social {
                fair_wages: false,
                child_labor_free: true,
                gender_equality: String::new(),
                community_investment: 0,
                worker_safety: String::new(),
            },
            governance: Governance {
                transparency_score: esg_score,
                financial_audits: esg_score > 70,
                anticorruption_policies: esg_score > 80,
                board_diversity: String::new(),
            },
        }
    }

    fn metadata(&self, cooperative: &Cooperative, now: DateTime<Utc>) -> Map<String, Value> {
        let mut metadata = cooperative.metadata.clone();
        let stamps = [
            ("lastUpdated", now.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            ("dataQuality", DATA_QUALITY_ENHANCED.to_string()),
            ("verificationStatus", VERIFICATION_PENDING_REVIEW.to_string()),
            ("migrationVersion", MIGRATION_VERSION.to_string()),
            ("schemaVersion", SCHEMA_VERSION.to_string()),
        ];
        for (key, value) in stamps {
            metadata.insert(key.to_string(), Value::String(value));
        }
        metadata
    }
}

impl Enricher for DefaultEnricher {
    fn enrich(
        &self,
        cooperative: &Cooperative,
        now: DateTime<Utc>,
        rng: &mut dyn RngCore,
    ) -> EnhancedCooperative {
        let security_score = calculate_security_score(cooperative, rng);
        let certifications = generate_certifications(security_score, now, rng);
        let esg_score = calculate_esg_score(security_score, &certifications);
        let activities = parse_activities(&cooperative.nature_activite);
        let coordinates = resolve_coordinates(&cooperative.region, rng);
        let risk_factors = generate_risk_factors(security_score, &certifications, rng);
        let overall_risk = determine_overall_risk(&risk_factors);
        let phones = split_phone_numbers(&cooperative.contact);

        // Flags derived from the certification list generated above
        let certified_count = count_certified(&certifications);
        let certified_organic = certifications
            .iter()
            .any(|c| c.certification_type == CertificationType::UsdaOrganic && c.is_certified());

        debug!(
            id = %cooperative.id,
            security_score,
            esg_score,
            certifications = certifications.len(),
            overall_risk = %overall_risk,
            "Enhanced cooperative"
        );

        EnhancedCooperative {
            id: cooperative.id.clone(),
            basic_info: BasicInfo {
                name: cooperative.name.clone(),
                acronym: String::new(),
                region: cooperative.region.clone(),
                departement: cooperative.departement.clone(),
                commune: String::new(),
                coordinates,
                registration_number: cooperative.registration_number.clone().unwrap_or_default(),
                founded_year: extract_founded_year(cooperative.registration_number.as_deref()),
                member_count: 0,
                status: cooperative.status_or_pending().to_string(),
            },
            operations: Operations {
                secteur: cooperative.secteur.clone(),
                main_crops: Vec::new(),
                production_capacity: Quantity::zero("tonnes"),
                activities,
                certified_organic,
                irrigation_method: String::new(),
            },
            contact: ContactInfo {
                president: cooperative.president.clone(),
                phone: phones.primary,
                alternate_phone: phones.alternate,
                ..ContactInfo::default()
            },
            security: self.security_profile(security_score, now),
            compliance: self.compliance(security_score, certifications),
            sustainability: self.sustainability(esg_score),
            supply_chain: SupplyChain {
                upstream_partners: Vec::new(),
                downstream_partners: Vec::new(),
                traceability_level: "basic".to_string(),
                blockchain_enabled: false,
                quality_metrics: QualityMetrics::default(),
                certified_supply_chain: certified_count > 0,
            },
            financial_health: FinancialHealth {
                credit_rating: String::new(),
                annual_revenue: 0,
                debt_to_equity: 0,
                payment_history: "unknown".to_string(),
                financial_stability: if security_score > 60 { "stable" } else { "unknown" }
                    .to_string(),
            },
            risk_assessment: RiskAssessment {
                overall_risk,
                risk_factors,
                mitigation_plans: Vec::new(),
                last_assessment_date: now,
                next_review_date: now + self.review_interval,
            },
            traceability: extend_traceability(&cooperative.traceability, &cooperative.source, now),
            ermits_integration: ErmitsIntegration::default(),
            metadata: self.metadata(cooperative, now),
        }
    }
}

/// Whole-percent share of listed certifications that are held; 0 for none
fn compliance_score(certifications: &[Certification]) -> u8 {
    if certifications.is_empty() {
        return 0;
    }
    (count_certified(certifications) * 100 / certifications.len()) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::processing::certification::CertificationStatus;
    use crate::pipeline::processing::risk::RiskLevel;
    use crate::pipeline::processing::traceability::{content_hash, TraceabilityRecord};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        "2025-06-01T08:30:00Z".parse().unwrap()
    }

    fn sample() -> Cooperative {
        Cooperative::from_raw(json!({
            "id": 42,
            "name": "SOCIETE COOPERATIVE AGRICOLE DE DALOA",
            "region": "Sassandra-Marahoue",
            "departement": "DALOA",
            "registrationNumber": "CI-DAL-2015",
            "secteur": "Agriculture",
            "natureActivite": "Production, collecte et commercialisation de cacao",
            "contact": "0102030405 / 0607080910",
            "president": "KOUASSI Yao",
            "status": "verified",
            "traceability": [{"event": "registered", "date": "2017-03-02"}],
            "metadata": {"source": "annuaire 2017", "lastUpdated": "2017-12-31"}
        }))
        .unwrap()
    }

    fn enrich_with_seed(coop: &Cooperative, seed: u64) -> EnhancedCooperative {
        let mut rng = StdRng::seed_from_u64(seed);
        DefaultEnricher::new().enrich(coop, now(), &mut rng)
    }

    #[test]
    fn copies_and_derives_basic_fields() {
        let enhanced = enrich_with_seed(&sample(), 1);

        assert_eq!(enhanced.id, json!(42));
        assert_eq!(enhanced.basic_info.name, "SOCIETE COOPERATIVE AGRICOLE DE DALOA");
        assert_eq!(enhanced.basic_info.founded_year, 2015);
        assert_eq!(enhanced.basic_info.registration_number, "CI-DAL-2015");
        assert_eq!(enhanced.basic_info.status, "verified");
        assert_eq!(
            enhanced.operations.activities,
            vec!["Production", "Collection", "Marketing"]
        );
        assert_eq!(enhanced.contact.phone, "0102030405");
        assert_eq!(enhanced.contact.alternate_phone, "0607080910");
        assert_eq!(enhanced.contact.president, "KOUASSI Yao");
        assert!((enhanced.basic_info.coordinates.lat - 6.85).abs() <= 0.1 + 1e-9);
    }

    #[test]
    fn minimal_record_degrades_to_defaults() {
        let coop = Cooperative::from_raw(json!({"id": "x", "name": "COOP"})).unwrap();
        let enhanced = enrich_with_seed(&coop, 2);

        assert_eq!(enhanced.basic_info.status, "pending");
        assert_eq!(enhanced.basic_info.founded_year, 2017);
        assert_eq!(enhanced.basic_info.registration_number, "");
        assert!(enhanced.operations.activities.is_empty());
        assert_eq!(enhanced.contact, ContactInfo::default());
        assert_eq!(enhanced.traceability.len(), 1);
    }

    #[test]
    fn certification_flags_agree_with_certification_list() {
        let coop = sample();
        for seed in 0..200 {
            let enhanced = enrich_with_seed(&coop, seed);
            let certs = &enhanced.compliance.certifications;
            let held = certs.iter().filter(|c| c.status == CertificationStatus::Certified).count();

            assert_eq!(enhanced.supply_chain.certified_supply_chain, held > 0);
            assert_eq!(
                enhanced.operations.certified_organic,
                certs.iter().any(|c| c.certification_type == CertificationType::UsdaOrganic
                    && c.status == CertificationStatus::Certified)
            );
            let expected_score = if certs.is_empty() { 0 } else { held * 100 / certs.len() };
            assert_eq!(enhanced.compliance.compliance_score as usize, expected_score);
            assert_eq!(
                enhanced.sustainability.esg_score,
                calculate_esg_score(enhanced.security.overall_score, certs)
            );
        }
    }

    #[test]
    fn score_conditional_fields_follow_thresholds() {
        let coop = sample();
        for seed in 0..100 {
            let e = enrich_with_seed(&coop, seed);
            let score = e.security.overall_score;
            assert_eq!(e.security.level, SecurityLevel::from_score(score));
            assert_eq!(e.security.last_assessment.is_some(), score > 50);
            assert_eq!(e.security.data_protection.encryption, score > 70);
            assert_eq!(e.security.data_protection.backup_frequency == "monthly", score > 60);
            assert_eq!(e.financial_health.financial_stability == "stable", score > 60);
            assert_eq!(e.compliance.regulatory_requirements.food_safety == "compliant", score > 70);
            let esg = e.sustainability.esg_score;
            assert_eq!(e.sustainability.governance.transparency_score, esg);
            assert_eq!(e.sustainability.governance.financial_audits, esg > 70);
            assert_eq!(e.sustainability.governance.anticorruption_policies, esg > 80);
            if e.risk_assessment.risk_factors.is_empty() {
                assert_eq!(e.risk_assessment.overall_risk, RiskLevel::Low);
            }
        }
    }

    #[test]
    fn appends_traceability_entry_with_hash_of_source_record() {
        let coop = sample();
        let enhanced = enrich_with_seed(&coop, 3);

        assert_eq!(enhanced.traceability.len(), 2);
        assert_eq!(
            enhanced.traceability[0],
            TraceabilityRecord::Prior(json!({"event": "registered", "date": "2017-03-02"}))
        );
        match &enhanced.traceability[1] {
            TraceabilityRecord::Entry(entry) => {
                assert_eq!(entry.data_hash, content_hash(&coop.source));
                assert_eq!(entry.date, now());
            }
            other => panic!("unexpected entry {other:?}"),
        }
    }

    #[test]
    fn metadata_merges_input_and_migration_stamps() {
        let enhanced = enrich_with_seed(&sample(), 4);
        let metadata = &enhanced.metadata;

        assert_eq!(metadata["source"], "annuaire 2017");
        assert_eq!(metadata["lastUpdated"], "2025-06-01T08:30:00Z");
        assert_eq!(metadata["dataQuality"], "enhanced");
        assert_eq!(metadata["verificationStatus"], "pending_review");
        assert_eq!(metadata["migrationVersion"], "1.0.0");
        assert_eq!(metadata["schemaVersion"], "2.0.0");
    }

    #[test]
    fn review_dates_use_interval() {
        let e = enrich_with_seed(&sample(), 5);
        assert_eq!(e.risk_assessment.last_assessment_date, now());
        assert_eq!(e.risk_assessment.next_review_date, now() + Duration::days(180));
    }

    #[test]
    fn same_seed_same_record() {
        assert_eq!(enrich_with_seed(&sample(), 9), enrich_with_seed(&sample(), 9));
    }

    #[test]
    fn serializes_camel_case_sections() {
        let value = serde_json::to_value(enrich_with_seed(&sample(), 6)).unwrap();
        for key in [
            "basicInfo",
            "operations",
            "contact",
            "security",
            "compliance",
            "sustainability",
            "supplyChain",
            "financialHealth",
            "riskAssessment",
            "traceability",
            "ermitsIntegration",
            "metadata",
        ] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
        assert_eq!(value["ermitsIntegration"]["vendorSoluceLinked"], false);
        assert!(value["ermitsIntegration"]["lastSyncDate"].is_null());
        assert_eq!(value["operations"]["productionCapacity"]["unit"], "tonnes");
        assert_eq!(value["sustainability"]["environmental"]["waterUsage"]["unit"], "m³");
    }

    #[test]
    fn compliance_score_truncates() {
        let make = |status| Certification {
            certification_type: CertificationType::Haccp,
            status,
            application_date: None,
            expiry_date: None,
            certification_body: String::new(),
        };
        let certs = vec![
            make(CertificationStatus::Certified),
            make(CertificationStatus::Pending),
            make(CertificationStatus::Pending),
        ];
        assert_eq!(compliance_score(&certs), 33);
        assert_eq!(compliance_score(&[]), 0);
    }
}
