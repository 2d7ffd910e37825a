//! vitalis Reference Runtime: Demo CLI
//!
//! Runs one or all of the four reference scenarios against the in-memory
//! backend and canned model client.
//!
//! Usage:
//!   cargo run -p demo -- run-all
//!   cargo run -p demo -- dashboard
//!   cargo run -p demo -- --config vitalis.toml vitals
//!   cargo run -p demo -- endpoints

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use vitalis_contracts::{
    endpoint::Endpoint,
    error::VitalisResult,
    medication::MedicationId,
    report::ReportId,
};
use vitalis_core::config::VitalisConfig;
use vitalis_ref::scenarios::{dashboard, documents, medications, vitals_trend};

// ── CLI definition ────────────────────────────────────────────────────────────

/// vitalis: personal health-record store demo.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "vitalis reference runtime demo",
    long_about = "Runs vitalis demo scenarios showing the health-record store,\n\
                  derived queries, document analysis, and journal sync."
)]
struct Cli {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run all four scenarios in sequence.
    RunAll,
    /// Scenario 1: Daily Dashboard (score, refill alert, doses, emergency card).
    Dashboard,
    /// Scenario 2: Vitals and Trends (logging, trend series, insights).
    Vitals,
    /// Scenario 3: Medical Documents (capture, classification, offline sync).
    Documents,
    /// Scenario 4: Prescription Scan (candidate extraction and promotion).
    Medications,
    /// Print the persistence service calls under the configured base URL.
    Endpoints,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let result = load_config(cli.config.as_ref()).and_then(|config| {
        print_banner(&config);
        match cli.command {
            Command::RunAll => run_all(&config),
            Command::Dashboard => dashboard::run_scenario(&config),
            Command::Vitals => vitals_trend::run_scenario(&config),
            Command::Documents => documents::run_scenario(&config),
            Command::Medications => medications::run_scenario(&config),
            Command::Endpoints => {
                print_endpoints(&config);
                Ok(())
            }
        }
    });

    match result {
        Ok(()) => {
            println!("All selected commands completed successfully.");
        }
        Err(e) => {
            eprintln!("Demo error: {}", e);
            std::process::exit(1);
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> VitalisResult<VitalisConfig> {
    let config = match path {
        Some(path) => VitalisConfig::from_file(path)?,
        None => VitalisConfig::default(),
    };
    let config = config.with_env_overrides();
    info!(base_url = %config.api.base_url, initial_score = config.score.initial, "configuration loaded");
    Ok(config)
}

// ── Dispatch ──────────────────────────────────────────────────────────────────

fn run_all(config: &VitalisConfig) -> VitalisResult<()> {
    dashboard::run_scenario(config)?;
    vitals_trend::run_scenario(config)?;
    documents::run_scenario(config)?;
    medications::run_scenario(config)?;
    Ok(())
}

fn print_endpoints(config: &VitalisConfig) {
    let sample_med = MedicationId::new("42");
    let sample_report = ReportId::new("7");
    let table = [
        Endpoint::FetchUser,
        Endpoint::UpdateUser,
        Endpoint::FetchMedications,
        Endpoint::AddMedication,
        Endpoint::RemoveMedication(sample_med.clone()),
        Endpoint::TakeDose(sample_med),
        Endpoint::FetchVitals,
        Endpoint::AddVital,
        Endpoint::FetchReports,
        Endpoint::AddReport,
        Endpoint::RemoveReport(sample_report),
    ];

    println!("Persistence service calls:");
    for endpoint in &table {
        println!(
            "  {:<7} {:<55} {}",
            endpoint.method().to_string(),
            endpoint.url(&config.api.base_url),
            if endpoint.has_body() { "json body" } else { "" }
        );
    }
    println!();
}

// ── Banner ────────────────────────────────────────────────────────────────────

fn print_banner(config: &VitalisConfig) {
    println!();
    println!("vitalis: Personal Health Record Store");
    println!("Reference Demo");
    println!("=====================================");
    println!();
    println!("Each mutation:");
    println!("  [1] Applies to the in-memory store atomically (unknown ids are ignored)");
    println!("  [2] Raises the health score where the action earns it (capped at 100)");
    println!("  [3] Appends one change to the SHA-256 linked journal");
    println!("  [4] Is replayed to the persistence service on sync, in order");
    println!();
    println!("  API base URL:  {}", config.api.base_url);
    println!("  Initial score: {}", config.score.initial);
    println!();
}
