//! Site listing, summary cards, and the occupancy heatmap

use anyhow::Result;
use lanescope_core::{heatmap, Dashboard, Formatter, OccupancyGrid};
use rand::rngs::StdRng;
use rand::SeedableRng;

pub fn cmd_sites(dashboard: &Dashboard, json: bool) -> Result<()> {
    let sites = dashboard.list_sites();
    if json {
        println!("{}", serde_json::to_string_pretty(&sites)?);
        return Ok(());
    }

    println!();
    println!("🎳 Sites");
    for site in sites {
        println!("   {:<14} {} ({})", site.id, site.label, site.city);
    }
    Ok(())
}

pub fn cmd_summary(dashboard: &Dashboard, site: &str, json: bool) -> Result<()> {
    let summary = dashboard.summary(site)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    let euro = Formatter::Euro;
    println!();
    println!("📊 {} — {}", site, summary.month);
    println!("   Daily revenue:   {}", euro.format(summary.daily_revenue));
    println!("   Annual revenue:  {}", euro.format(summary.annual_revenue));
    println!("   Lane occupancy:  {}%", summary.occupancy_rate);
    println!("   Average basket:  {}", euro.format(summary.avg_basket));
    Ok(())
}

pub fn cmd_heatmap(seed: Option<u64>, json: bool) -> Result<()> {
    let grid = match seed {
        Some(seed) => heatmap::generate_with(&mut StdRng::seed_from_u64(seed)),
        None => heatmap::generate(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&grid)?);
        return Ok(());
    }

    println!();
    println!("🗓️  Lane occupancy by hour (simulated data)");
    print!("      ");
    for hour_index in 0..heatmap::OPEN_HOURS {
        print!("{:>6}", OccupancyGrid::hour_label(hour_index));
    }
    println!();
    for (day, row) in grid.cells().iter().enumerate() {
        print!("   {:<3}", heatmap::DAY_LABELS[day]);
        for &cell in row {
            print!("{:>5}%", cell);
        }
        println!();
    }
    Ok(())
}
