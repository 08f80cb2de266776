//! KASPA-NEXUS Explorer CLI
//!
//! Runs the query service or prints emission data to the terminal.

use clap::{Parser, Subcommand};
use nexus_emission::units::{format_hashrate, format_supply, kas_to_f64};
use nexus_explorer::{logging::init_logging, router, AppState, Clock, ExplorerConfig, SystemClock};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "nexus-explorer")]
#[command(author = "KASPA-NEXUS")]
#[command(version)]
#[command(about = "KASPA-NEXUS - Kaspa network and emission schedule service", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (defaults to nexus.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        /// Listen address, overrides server.listen_addr
        #[arg(short, long)]
        listen: Option<String>,
    },

    /// Show the estimated current network state
    Snapshot {
        /// Print JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Print the projected emission schedule as JSON
    Schedule {
        /// Years to project
        #[arg(short, long)]
        years: Option<u32>,

        /// Samples per year
        #[arg(short, long)]
        samples: Option<u32>,
    },

    /// List halving events
    Halvings {
        /// Maximum number of events
        #[arg(short, long)]
        max: Option<u32>,

        /// Year horizon
        #[arg(short, long)]
        years: Option<u32>,
    },

    /// Print the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = ExplorerConfig::load(cli.config.as_deref())?;
    init_logging(&config.logging, cli.verbose);

    match cli.command {
        Commands::Serve { listen } => serve(config, listen).await,
        Commands::Snapshot { json } => snapshot(config, json),
        Commands::Schedule { years, samples } => schedule(config, years, samples),
        Commands::Halvings { max, years } => halvings(config, max, years),
        Commands::Config => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}

async fn serve(config: ExplorerConfig, listen: Option<String>) -> anyhow::Result<()> {
    let addr = listen.unwrap_or_else(|| config.server.listen_addr.clone());
    let state = Arc::new(AppState::new(config)?);
    let app = router(state);

    tracing::info!("╔══════════════════════════════════════════════════════════════╗");
    tracing::info!("║              KASPA-NEXUS EXPLORER                            ║");
    tracing::info!("║        Network & Emission Schedule API                       ║");
    tracing::info!("╚══════════════════════════════════════════════════════════════╝");
    tracing::info!("Explorer API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Explorer API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
    }
}

fn snapshot(config: ExplorerConfig, json: bool) -> anyhow::Result<()> {
    let state = AppState::new(config)?;
    let now = SystemClock.now();

    if json {
        let data = nexus_explorer::api::build_network_stats(&state, now);
        println!("{}", serde_json::to_string_pretty(&data)?);
        return Ok(());
    }

    let params = state.calculator.params();
    let snap = state.calculator.current_snapshot(now, params.genesis_timestamp);
    println!("Kaspa Network (estimated)");
    println!("  Block height:        {}", snap.estimated_block_height);
    println!("  Block reward:        {} KAS", snap.current_block_reward.normalize());
    println!(
        "  Total supply:        {} KAS ({:.2}% of max)",
        format_supply(snap.current_total_supply),
        snap.percent_of_max
    );
    println!("  Halvings so far:     {}", snap.current_halving_number);
    println!(
        "  Next halving:        block {} (~{} days)",
        snap.next_halving_block, snap.days_until_next_halving
    );
    println!(
        "  Hashrate:            {} ({})",
        format_hashrate(state.config.network.hashrate_ths),
        state.config.network.source
    );
    Ok(())
}

fn schedule(
    config: ExplorerConfig,
    years: Option<u32>,
    samples: Option<u32>,
) -> anyhow::Result<()> {
    let state = AppState::new(config)?;
    let years = years.unwrap_or(state.config.query.years_to_project);
    let samples = samples.unwrap_or(state.config.query.samples_per_year);

    let points: Vec<_> = state.calculator.generate_schedule(years, samples)?.collect();
    println!("{}", serde_json::to_string_pretty(&points)?);
    Ok(())
}

fn halvings(config: ExplorerConfig, max: Option<u32>, years: Option<u32>) -> anyhow::Result<()> {
    let state = AppState::new(config)?;
    let max = max.unwrap_or(state.config.query.max_halving_events);
    let years = years.unwrap_or(state.config.query.years_to_project);

    println!(
        "{:>3}  {:>12}  {:>4}  {:>5}  {:>14}  {:>14}  {:>10}  {:>7}",
        "#", "Block", "Year", "Month", "Before (KAS)", "After (KAS)", "Supply", "% Max"
    );
    for event in state.calculator.list_halving_events(max, years) {
        println!(
            "{:>3}  {:>12}  {:>4}  {:>5}  {:>14.8}  {:>14.8}  {:>10}  {:>6.2}%",
            event.halving_number,
            event.block_height,
            event.year,
            event.month,
            kas_to_f64(event.reward_before),
            kas_to_f64(event.reward_after),
            format_supply(event.total_supply),
            event.percent_of_max,
        );
    }
    Ok(())
}
