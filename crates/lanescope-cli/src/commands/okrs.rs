//! Objective progress commands

use anyhow::Result;
use lanescope_core::Dashboard;

use super::progress_bar;

pub fn cmd_objectives(dashboard: &Dashboard, id: Option<&str>, json: bool) -> Result<()> {
    let ids: Vec<String> = match id {
        Some(id) => vec![id.to_string()],
        None => dashboard.objectives().iter().map(|o| o.id.clone()).collect(),
    };

    let mut statuses = Vec::with_capacity(ids.len());
    for id in &ids {
        statuses.push(dashboard.objective_status(id)?);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&statuses)?);
        return Ok(());
    }

    for status in &statuses {
        println!();
        println!("{} {} — {}", status.emoji, status.title, status.description);
        println!(
            "   Overall  {} {:>3}% ({})",
            progress_bar(status.overall_progress, 20),
            status.overall_progress,
            status.band
        );
        for kr in &status.key_results {
            println!();
            println!("   {} ({} / {} {})", kr.label, kr.current, kr.target, kr.unit);
            println!(
                "   {} {:>3}% ({})",
                progress_bar(kr.progress, 20),
                kr.progress,
                kr.band
            );
            for action in &kr.actions {
                let mark = if action.done { "✓" } else { "·" };
                println!("     {} {}", mark, action.text);
            }
        }
    }
    Ok(())
}
