//! Vestlock Command Line Interface
//!
//! Usage:
//!   vestlock run             - Seed the demo catalog and drive both
//!                              reconciliation loops until Ctrl-C
//!   vestlock status          - One-shot operator view over the ledger
//!   vestlock export-claims   - Render the claims record to stdout

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

use vestlock_core::format_duration;
use vestlock_sim::{
    claims_to_csv, claims_to_text, demo_catalog, shared_catalog, ClientSession, OperatorDesk,
    Roster, SimConfig,
};
use vestlock_store::{JsonFileLedger, LedgerStore};

#[derive(Parser)]
#[command(name = "vestlock")]
#[command(about = "Time-locked investment simulation platform")]
#[command(version)]
struct Cli {
    /// Ledger data directory
    #[arg(long, default_value = "./vestlock_data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the client and operator reconciliation loops
    Run {
        /// Reconciliation cadence in milliseconds for both loops
        #[arg(long, default_value_t = 1000)]
        tick_ms: u64,

        /// Stop after this many seconds instead of waiting for Ctrl-C
        #[arg(long)]
        for_secs: Option<u64>,
    },

    /// Print the operator view of all ledgers and pending claims
    Status,

    /// Render the withdrawal claims record
    ExportClaims {
        #[arg(long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportFormat {
    Csv,
    Txt,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let data_dir = cli.data_dir.display().to_string();

    match cli.command {
        Commands::Run { tick_ms, for_secs } => run(data_dir, tick_ms, for_secs).await,
        Commands::Status => status(data_dir).await,
        Commands::ExportClaims { format } => export_claims(data_dir, format).await,
    }
}

async fn run(
    data_dir: String,
    tick_ms: u64,
    for_secs: Option<u64>,
) -> Result<(), Box<dyn Error>> {
    let config = SimConfig {
        data_dir: data_dir.clone(),
        client_tick_ms: tick_ms,
        operator_tick_ms: tick_ms,
        ..SimConfig::from_env()
    };

    let store = Arc::new(JsonFileLedger::new(&config.data_dir));
    let catalog = shared_catalog(demo_catalog());
    let roster = Roster::demo();

    let mut sessions = Vec::new();
    for profile in roster.clients() {
        let session = Arc::new(ClientSession::new(
            profile,
            store.clone(),
            catalog.clone(),
            config.clone(),
        ));
        session.load().await?;
        sessions.push(session);
    }

    let desk = Arc::new(OperatorDesk::new(
        roster.clients(),
        store.clone(),
        catalog.clone(),
        config.clone(),
    ));

    let mut handles = Vec::new();
    for session in &sessions {
        let session = session.clone();
        handles.push(tokio::spawn(async move { session.run().await }));
    }
    {
        let desk = desk.clone();
        handles.push(tokio::spawn(async move { desk.run().await }));
    }

    info!(data_dir = %data_dir, "Simulation running, Ctrl-C to stop");
    match for_secs {
        Some(secs) => tokio::time::sleep(Duration::from_secs(secs)).await,
        None => {
            tokio::signal::ctrl_c().await?;
        }
    }

    for session in &sessions {
        session.stop();
    }
    desk.stop();
    for handle in handles {
        handle.await?;
    }

    Ok(())
}

async fn status(data_dir: String) -> Result<(), Box<dyn Error>> {
    let store = Arc::new(JsonFileLedger::new(&data_dir));
    let catalog = shared_catalog(demo_catalog());
    let desk = OperatorDesk::new(
        Roster::demo().clients(),
        store,
        catalog,
        SimConfig::default(),
    );

    desk.tick(Utc::now()).await?;
    let stats = desk.stats().await?;
    println!(
        "schemes: {} ({} live) | clients: {} | outstanding: {} | pending claims: {}",
        stats.total_schemes,
        stats.live_schemes,
        stats.total_clients,
        stats.outstanding_investments,
        stats.pending_claims,
    );

    for owned in desk.view().await {
        println!(
            "{:<16} {:<20} {:>10}  {:?}  {} left",
            owned.owner_name,
            owned.investment.scheme_name,
            owned.investment.amount,
            owned.investment.status,
            format_duration(owned.investment.remaining_ms),
        );
    }

    Ok(())
}

async fn export_claims(data_dir: String, format: ExportFormat) -> Result<(), Box<dyn Error>> {
    let store = JsonFileLedger::new(&data_dir);
    let claims = store.load_claims().await?;

    match format {
        ExportFormat::Csv => print!("{}", claims_to_csv(&claims)),
        ExportFormat::Txt => println!("{}", claims_to_text(&claims)),
    }

    Ok(())
}
