//! Metric catalog, snapshots, and period details

use anyhow::Result;
use lanescope_core::{Dashboard, Period, TargetStatus};

use super::{trend_badge, truncate};

pub fn cmd_metrics(dashboard: &Dashboard, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(dashboard.metrics())?);
        return Ok(());
    }

    println!();
    println!("📈 Metric catalog");
    for metric in dashboard.metrics() {
        let target = match metric.target {
            Some(t) => format!("target {}", metric.format_value(t)),
            None => "no target".to_string(),
        };
        println!(
            "   {:<24} {:<28} {}",
            metric.id,
            truncate(&metric.label, 28),
            target
        );
    }
    Ok(())
}

pub fn cmd_snapshot(
    dashboard: &Dashboard,
    site: &str,
    metric: Option<&str>,
    json: bool,
) -> Result<()> {
    let ids: Vec<String> = match metric {
        Some(id) => vec![id.to_string()],
        None => dashboard.metrics().iter().map(|m| m.id.clone()).collect(),
    };

    let mut snapshots = Vec::with_capacity(ids.len());
    for id in &ids {
        snapshots.push(dashboard.snapshot(site, id)?);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshots)?);
        return Ok(());
    }

    println!();
    println!("📊 {} — latest month", site);
    for snapshot in &snapshots {
        let status = match snapshot.target_status {
            Some(TargetStatus::OnTarget) => "✓ on target",
            Some(TargetStatus::InProgress) => "… in progress",
            None => "",
        };
        println!(
            "   {:<24} {:>12}  {:>8}  {}",
            snapshot.metric_id,
            snapshot.formatted,
            trend_badge(snapshot.trend),
            status
        );
    }
    Ok(())
}

pub fn cmd_detail(
    dashboard: &Dashboard,
    site: &str,
    metric: &str,
    period: &str,
    json: bool,
) -> Result<()> {
    let period: Period = period.parse().map_err(anyhow::Error::msg)?;
    let detail = dashboard.detail(site, metric, period)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&detail)?);
        return Ok(());
    }

    let definition = dashboard
        .metrics()
        .iter()
        .find(|m| m.id == detail.metric_id)
        .cloned();
    let format = |v: f64| match &definition {
        Some(m) => m.format_value(v),
        None => v.to_string(),
    };

    println!();
    println!("📈 {} — {} over {}", site, detail.metric_id, period.label());
    for point in &detail.points {
        println!("   {:<12} {}", point.month.abbrev(), format(point.value));
    }
    println!();
    println!(
        "   max {} ({})   min {} ({})   avg {}",
        format(detail.aggregate.max),
        detail.aggregate.max_month,
        format(detail.aggregate.min),
        detail.aggregate.min_month,
        format(detail.aggregate.avg)
    );
    if !detail.insights.is_empty() {
        println!();
        println!("   Insights:");
        for insight in &detail.insights {
            println!("   • {}", insight.text);
        }
    }
    Ok(())
}
