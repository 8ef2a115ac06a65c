use chrono::{TimeZone, Utc};
use coop_migrate::app::migrate_use_case::MigrateUseCase;
use coop_migrate::config::MigrationConfig;
use coop_migrate::MigrationError;
use serde_json::{json, Value};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

fn sample_directory() -> Value {
    json!({
        "cooperatives": [
            {
                "id": 1,
                "name": "SOCIETE COOPERATIVE AGRICOLE DE GÔHÉ",
                "region": "GÔHÉ-DJIBOUA",
                "departement": "GAGNOA",
                "secteur": "Agriculture",
                "natureActivite": "Production, collecte et commercialisation du cacao",
                "contact": "07 12 34 56 / 05 98 76 54",
                "phone": "07 12 34 56",
                "president": "KOUASSI Jean",
                "registrationNumber": "CI-GAG-B-2014",
                "status": "verified",
                "traceability": [{"date": "2020-01-01", "event": "imported"}],
                "metadata": {"importBatch": 7}
            },
            {
                "id": "coop-2",
                "name": "COOP SANS REGION",
                "region": null,
                "phone": null,
                "natureActivite": "ACHAT ET TRANSPORT ANACARDE"
            },
            {
                "id": 3,
                "name": "SCOOPS DU PORO",
                "region": "poro",
                "registrationNumber": "CI-KOR-ABC",
                "natureActivite": "STOCKAGE COTON"
            }
        ]
    })
}

fn write_input(dir: &Path, document: &Value) -> std::path::PathBuf {
    let path = dir.join("cooperatives.json");
    fs::write(&path, serde_json::to_string_pretty(document).unwrap()).unwrap();
    path
}

fn config(seed: Option<u64>) -> MigrationConfig {
    MigrationConfig {
        seed,
        ..MigrationConfig::default()
    }
}

fn read_output(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

/// Object key paths, ignoring array contents whose length varies run to run
fn shape(value: &Value, prefix: &str, out: &mut BTreeSet<String>) {
    if let Value::Object(map) = value {
        for (key, child) in map {
            let path = format!("{}/{}", prefix, key);
            out.insert(path.clone());
            shape(child, &path, out);
        }
    }
}

#[test]
fn migrates_every_record_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), &sample_directory());
    let output = dir.path().join("out").join("enhanced.json");

    let now = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
    let outcome = MigrateUseCase::for_files(&input, &output, &config(Some(42)))
        .execute(now)
        .unwrap();

    let document = read_output(&output);
    let cooperatives = document["cooperatives"].as_array().unwrap();
    assert_eq!(cooperatives.len(), 3);
    assert_eq!(document["metadata"]["totalCooperatives"], 3);
    assert_eq!(document["metadata"]["verifiedCooperatives"], 1);
    assert_eq!(document["metadata"]["country"], "Côte d'Ivoire");
    assert_eq!(document["metadata"]["version"], "2.0.0");
    assert_eq!(document["metadata"]["migrationDate"], "2025-03-01T12:00:00Z");

    let distribution = &document["metadata"]["statistics"]["securityDistribution"];
    let sum: u64 = ["excellent", "good", "medium", "poor", "critical"]
        .iter()
        .map(|level| distribution[*level].as_u64().unwrap())
        .sum();
    assert_eq!(sum, 3);
    assert_eq!(outcome.statistics.security_distribution.total(), 3);

    let held: usize = cooperatives
        .iter()
        .flat_map(|c| c["compliance"]["certifications"].as_array().unwrap())
        .filter(|cert| cert["status"] == "certified")
        .count();
    assert_eq!(
        document["metadata"]["statistics"]["totalCertifications"],
        held
    );
    assert_eq!(outcome.statistics.total_certifications, held);
}

#[test]
fn records_carry_their_source_fields() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), &sample_directory());
    let output = dir.path().join("enhanced.json");

    MigrateUseCase::for_files(&input, &output, &config(Some(7)))
        .execute(Utc::now())
        .unwrap();

    let document = read_output(&output);
    let first = &document["cooperatives"][0];
    assert_eq!(first["id"], 1);
    assert_eq!(first["basicInfo"]["name"], "SOCIETE COOPERATIVE AGRICOLE DE GÔHÉ");
    assert_eq!(first["basicInfo"]["foundedYear"], 2014);
    assert_eq!(first["contact"]["phone"], "07 12 34 56");
    assert_eq!(first["contact"]["alternatePhone"], "05 98 76 54");
    assert_eq!(
        first["operations"]["activities"],
        json!(["Production", "Collection", "Marketing"])
    );
    assert_eq!(first["metadata"]["importBatch"], 7);
    assert_eq!(first["metadata"]["dataQuality"], "enhanced");

    let trail = first["traceability"].as_array().unwrap();
    assert_eq!(trail.len(), 2);
    assert_eq!(trail[0]["event"], "imported");
    assert_eq!(trail[1]["eventType"], "enhancement");
    assert_eq!(trail[1]["dataHash"].as_str().unwrap().len(), 16);

    let second = &document["cooperatives"][1];
    assert_eq!(second["id"], "coop-2");
    assert_eq!(second["basicInfo"]["status"], "pending");
    assert_eq!(second["basicInfo"]["region"], "");
    let lat = second["basicInfo"]["coordinates"]["lat"].as_f64().unwrap();
    assert!((lat - 5.36).abs() <= 0.5 + 1e-9);

    let third = &document["cooperatives"][2];
    assert_eq!(third["basicInfo"]["foundedYear"], 2017);
    assert_eq!(third["operations"]["activities"], json!(["Storage"]));
}

#[test]
fn unseeded_runs_produce_the_same_shape() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), &sample_directory());
    let first_out = dir.path().join("first.json");
    let second_out = dir.path().join("second.json");

    MigrateUseCase::for_files(&input, &first_out, &config(None))
        .execute(Utc::now())
        .unwrap();
    MigrateUseCase::for_files(&input, &second_out, &config(None))
        .execute(Utc::now())
        .unwrap();

    let first = read_output(&first_out);
    let second = read_output(&second_out);
    for (a, b) in first["cooperatives"]
        .as_array()
        .unwrap()
        .iter()
        .zip(second["cooperatives"].as_array().unwrap())
    {
        let (mut shape_a, mut shape_b) = (BTreeSet::new(), BTreeSet::new());
        shape(a, "", &mut shape_a);
        shape(b, "", &mut shape_b);
        assert_eq!(shape_a, shape_b);
    }
    assert_ne!(
        first["metadata"]["migrationRunId"],
        second["metadata"]["migrationRunId"]
    );
}

#[test]
fn seeded_runs_are_reproducible() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), &sample_directory());
    let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();

    let a = MigrateUseCase::for_files(&input, &dir.path().join("a.json"), &config(Some(99)))
        .execute(now)
        .unwrap();
    let b = MigrateUseCase::for_files(&input, &dir.path().join("b.json"), &config(Some(99)))
        .execute(now)
        .unwrap();

    assert_eq!(a.document, b.document);
}

#[test]
fn empty_directory_migrates_to_empty_document() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), &json!({"cooperatives": []}));
    let output = dir.path().join("enhanced.json");

    MigrateUseCase::for_files(&input, &output, &config(Some(1)))
        .execute(Utc::now())
        .unwrap();

    let document = read_output(&output);
    assert_eq!(document["cooperatives"], json!([]));
    assert_eq!(document["metadata"]["totalCooperatives"], 0);
    assert_eq!(document["metadata"]["statistics"]["averageSecurityScore"], 0.0);
    assert_eq!(document["metadata"]["statistics"]["averageESGScore"], 0.0);
}

#[test]
fn oddly_typed_fields_do_not_abort_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(
        dir.path(),
        &json!({"cooperatives": [
            {"id": 1, "name": null, "registrationNumber": 12.5, "status": 1},
            {"id": 2, "name": "COOP", "registrationNumber": "CI-SAN-2012"}
        ]}),
    );
    let output = dir.path().join("enhanced.json");

    MigrateUseCase::for_files(&input, &output, &config(Some(4)))
        .execute(Utc::now())
        .unwrap();

    let document = read_output(&output);
    let first = &document["cooperatives"][0]["basicInfo"];
    assert_eq!(first["name"], "");
    assert_eq!(first["registrationNumber"], "12.5");
    assert_eq!(first["foundedYear"], 2017);
    assert_eq!(first["status"], "1");
    assert_eq!(document["cooperatives"][1]["basicInfo"]["foundedYear"], 2012);
    assert_eq!(document["metadata"]["verifiedCooperatives"], 0);
}

#[test]
fn missing_input_reports_not_found_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("enhanced.json");

    let err = MigrateUseCase::for_files(&dir.path().join("missing.json"), &output, &config(None))
        .execute(Utc::now())
        .unwrap_err();

    assert!(matches!(err, MigrationError::InputNotFound { .. }));
    assert!(!output.exists());
}

#[test]
fn malformed_input_leaves_existing_output_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.json");
    fs::write(&input, "{\"cooperatives\": [").unwrap();
    let output = dir.path().join("enhanced.json");
    fs::write(&output, "previous").unwrap();

    let err = MigrateUseCase::for_files(&input, &output, &config(None))
        .execute(Utc::now())
        .unwrap_err();

    assert!(matches!(err, MigrationError::Json(_)));
    assert_eq!(fs::read_to_string(&output).unwrap(), "previous");
}
