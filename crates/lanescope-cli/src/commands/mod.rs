//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `overview` - Site listing, summary cards, and the occupancy heatmap
//! - `kpis` - Metric catalog, snapshots, and period details
//! - `okrs` - Objective progress commands

pub mod kpis;
pub mod okrs;
pub mod overview;

// Re-export command functions for main.rs
pub use kpis::*;
pub use okrs::*;
pub use overview::*;

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use lanescope_core::{Catalog, Dashboard, SiteDirectory};

/// Build the dashboard from a JSON site file, or from the built-in dataset
pub fn load_dashboard(data: Option<&Path>) -> Result<Dashboard> {
    let sites = match data {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open site data file {}", path.display()))?;
            let sites = SiteDirectory::from_json_reader(file)
                .with_context(|| format!("Invalid site data in {}", path.display()))?;
            tracing::info!(path = %path.display(), "Using site data file");
            sites
        }
        None => SiteDirectory::seeded(),
    };
    Ok(Dashboard::new(sites, Catalog::seeded()))
}

/// Render a trend as a signed percentage, or an em dash when unavailable
pub fn trend_badge(trend: Option<f64>) -> String {
    match trend {
        Some(t) if t >= 0.0 => format!("+{:.1}%", t),
        Some(t) => format!("{:.1}%", t),
        None => "—".to_string(),
    }
}

/// Fixed-width progress bar for percentages
pub fn progress_bar(pct: u8, width: usize) -> String {
    let filled = (pct as usize * width) / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
