//! Lanescope CLI - KPI/OKR dashboard for multi-site bowling operations
//!
//! Usage:
//!   lanescope sites                          List configured sites
//!   lanescope snapshot --site lyon           Latest KPI values
//!   lanescope detail --site lyon --metric daily-revenue --period 6m
//!   lanescope objectives                     OKR progress
//!   lanescope heatmap                        Simulated occupancy grid

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (warn)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let dashboard = commands::load_dashboard(cli.data.as_deref())?;

    match cli.command {
        Commands::Sites => commands::cmd_sites(&dashboard, cli.json),
        Commands::Metrics => commands::cmd_metrics(&dashboard, cli.json),
        Commands::Snapshot { site, metric } => {
            commands::cmd_snapshot(&dashboard, &site, metric.as_deref(), cli.json)
        }
        Commands::Detail {
            site,
            metric,
            period,
        } => commands::cmd_detail(&dashboard, &site, &metric, &period, cli.json),
        Commands::Objectives { id } => {
            commands::cmd_objectives(&dashboard, id.as_deref(), cli.json)
        }
        Commands::Summary { site } => commands::cmd_summary(&dashboard, &site, cli.json),
        Commands::Heatmap { seed } => commands::cmd_heatmap(seed, cli.json),
    }
}
