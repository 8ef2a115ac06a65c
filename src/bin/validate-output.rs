use anyhow::{Context, Result};
use clap::Parser;
use jsonschema::JSONSchema;
use serde_json::Value;
use std::{fs, path::PathBuf};

/// Validate a migrated cooperative document against the v2 output schema.
#[derive(Parser, Debug)]
#[command(name = "validate-output", version, about = "Validate migrated cooperative JSON against schema")]
struct Cli {
    /// Migrated document to validate
    path: PathBuf,

    /// Schema file (defaults to schemas/cooperatives_enhanced.v2.json)
    #[arg(long)]
    schema: Option<PathBuf>,
}

fn load_json(path: &PathBuf) -> Result<Value> {
    let data = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let json: Value =
        serde_json::from_str(&data).with_context(|| format!("Failed to parse JSON in {}", path.display()))?;
    Ok(json)
}

fn main() -> Result<()> {
    let args = Cli::parse();
    let schema_path = args
        .schema
        .unwrap_or_else(|| PathBuf::from("schemas/cooperatives_enhanced.v2.json"));

    let schema_json = load_json(&schema_path)?;
    let instance = load_json(&args.path)?;

    // jsonschema 0.17 borrows the schema for the validator's lifetime
    let schema_static: &'static Value = Box::leak(Box::new(schema_json));

    let compiled = JSONSchema::options()
        .compile(schema_static)
        .context("Failed to compile JSON Schema")?;

    let records = instance
        .get("cooperatives")
        .and_then(Value::as_array)
        .map_or(0, Vec::len);

    let result = compiled.validate(&instance);
    match result {
        Ok(()) => {
            println!("valid ({} cooperatives)", records);
            Ok(())
        }
        Err(errors) => {
            eprintln!("invalid:");
            for error in errors {
                eprintln!("- {} at {}", error, error.instance_path);
            }
            std::process::exit(1)
        }
    }
}
