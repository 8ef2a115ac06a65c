use chrono::Utc;
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info, warn};

use coop_migrate::app::migrate_use_case::MigrateUseCase;
use coop_migrate::config::MigrationConfig;
use coop_migrate::observability::{self, metrics};
use coop_migrate::pipeline::processing::aggregate::MigrationStatistics;
use coop_migrate::pipeline::processing::security::SecurityLevel;
use coop_migrate::MigrationError;

#[derive(Parser)]
#[command(name = "coop_migrate")]
#[command(about = "Enhance a cooperative directory with security, compliance and sustainability data")]
#[command(version)]
struct Cli {
    /// Cooperative directory to read [default: cooperatives_cote_ivoire.json]
    input: Option<PathBuf>,

    /// Where to write the enhanced document [default: cooperatives_enhanced.json]
    output: Option<PathBuf>,

    /// Configuration file (defaults to ./coop_migrate.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed the simulated variation for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Write a Prometheus text snapshot of run metrics to this file
    #[arg(long)]
    metrics_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let mut config = match MigrationConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => return report_failure(e),
    };
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }

    // Held until exit so buffered file logs are flushed
    let _log_guard = observability::init_logging(&config.log_dir);

    let input = cli.input.unwrap_or_else(|| config.default_input.clone());
    let output = cli.output.unwrap_or_else(|| config.default_output.clone());

    let metrics_handle = match cli.metrics_file {
        Some(_) => match metrics::init() {
            Ok(handle) => Some(handle),
            Err(e) => {
                warn!(error = %e, "Continuing without metrics");
                None
            }
        },
        None => None,
    };

    info!(input = %input.display(), output = %output.display(), seeded = config.seed.is_some(), "Starting migration");

    let mut use_case = MigrateUseCase::for_files(&input, &output, &config);
    match use_case.execute(Utc::now()) {
        Ok(outcome) => {
            print_summary(&outcome.statistics);
            if let (Some(path), Some(handle)) = (cli.metrics_file.as_deref(), metrics_handle) {
                write_metrics_snapshot(path, &handle.render());
            }
            ExitCode::SUCCESS
        }
        Err(e) if e.is_input_not_found() => {
            error!(input = %input.display(), "Input file not found");
            println!("Error: Could not find input file '{}'", input.display());
            println!("Usage: coop_migrate [input_file] [output_file]");
            ExitCode::FAILURE
        }
        Err(e) => report_failure(e),
    }
}

fn report_failure(e: MigrationError) -> ExitCode {
    error!(error = %e, "Migration failed");
    println!("Error during migration: {}", e);
    // Full cause chain (and backtrace when RUST_BACKTRACE is set)
    eprintln!("{:?}", anyhow::Error::new(e));
    ExitCode::FAILURE
}

fn write_metrics_snapshot(path: &Path, rendered: &str) {
    match fs::write(path, rendered) {
        Ok(()) => info!(path = %path.display(), "Wrote metrics snapshot"),
        Err(e) => warn!(path = %path.display(), error = %e, "Failed to write metrics snapshot"),
    }
}

fn print_summary(stats: &MigrationStatistics) {
    let rule = "=".repeat(60);
    println!("\n{}", rule);
    println!("Migration Complete!");
    println!("{}", rule);
    println!("Total cooperatives: {}", stats.total);
    println!("Verified cooperatives: {}", stats.verified);
    println!("Average security score: {:.2}/100", stats.average_security_score);
    println!("Average ESG score: {:.2}/100", stats.average_esg_score);
    println!("Total certifications: {}", stats.total_certifications);
    println!("\nSecurity Distribution:");
    for level in SecurityLevel::ALL {
        println!(
            "  {}: {} ({:.1}%)",
            level.label(),
            stats.security_distribution.count(level),
            stats.percentage(level)
        );
    }
    println!("{}", rule);
}
