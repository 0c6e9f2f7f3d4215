//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Lanescope - KPI and OKR dashboard for multi-site bowling operations
#[derive(Parser)]
#[command(name = "lanescope")]
#[command(about = "Terminal dashboard for bowling-center KPIs and OKRs", long_about = None)]
#[command(version)]
pub struct Cli {
    /// JSON file with site series (defaults to the built-in dataset)
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit machine-readable JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the configured sites
    Sites,

    /// List the metric catalog
    Metrics,

    /// Latest KPI values for a site
    Snapshot {
        /// Site id (see `sites`)
        #[arg(short, long)]
        site: String,

        /// Metric id; all metrics when omitted
        #[arg(short, long)]
        metric: Option<String>,
    },

    /// Period-scoped metric detail with aggregate and insights
    Detail {
        /// Site id (see `sites`)
        #[arg(short, long)]
        site: String,

        /// Metric id (see `metrics`)
        #[arg(short, long)]
        metric: String,

        /// Analysis window: 1m, 6m, or 1y
        #[arg(short, long, default_value = "1y")]
        period: String,
    },

    /// Objective (OKR) progress
    Objectives {
        /// Objective id; all objectives when omitted
        #[arg(long)]
        id: Option<String>,
    },

    /// Headline overview figures for a site
    Summary {
        /// Site id (see `sites`)
        #[arg(short, long)]
        site: String,
    },

    /// Simulated lane-occupancy heatmap
    Heatmap {
        /// RNG seed for a reproducible grid
        #[arg(long)]
        seed: Option<u64>,
    },
}
