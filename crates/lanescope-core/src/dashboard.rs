//! Dashboard facade
//!
//! The single entry point a presentation layer talks to. A [`Dashboard`]
//! owns the site directory and the metric/objective catalog as explicit
//! immutable configuration (built once at process start, shared by
//! reference, no globals) and recomputes every answer from scratch on each
//! call.

use serde::Serialize;

use crate::catalog::Catalog;
use crate::engine::{self, Aggregate, ProgressBand, TargetStatus};
use crate::error::{Error, Result};
use crate::heatmap::{self, OccupancyGrid};
use crate::insight::{self, Insight};
use crate::models::{
    Action, MetricDefinition, Month, MonthlyRecord, ObjectiveDefinition, Period, SiteSummary,
};
use crate::store::{self, SiteDirectory};

/// The analytics core behind the dashboard UI
#[derive(Debug, Clone)]
pub struct Dashboard {
    sites: SiteDirectory,
    catalog: Catalog,
}

/// Latest value of one metric for one site, with its month-over-month trend
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub metric_id: String,
    pub value: f64,
    pub formatted: String,
    /// Percentage change vs. the previous month; `None` when unavailable
    /// (short series or zero baseline) so callers render a placeholder
    pub trend: Option<f64>,
    pub target: Option<f64>,
    /// Capped progress toward the target, when one is set
    pub target_progress: Option<u8>,
    pub target_status: Option<TargetStatus>,
}

/// One point of a sliced metric series
#[derive(Debug, Clone, Serialize)]
pub struct MetricPoint {
    pub month: Month,
    pub value: f64,
}

/// Period-scoped view of one metric: the sliced series, its aggregate, and
/// the synthesized insights
#[derive(Debug, Clone, Serialize)]
pub struct MetricDetail {
    pub metric_id: String,
    pub period: Period,
    pub points: Vec<MetricPoint>,
    pub aggregate: Aggregate,
    pub insights: Vec<Insight>,
    pub target: Option<f64>,
}

/// Progress of one key result, ready for a per-row display
#[derive(Debug, Clone, Serialize)]
pub struct KeyResultStatus {
    pub id: String,
    pub label: String,
    pub current: f64,
    pub target: f64,
    pub unit: String,
    pub progress: u8,
    pub band: ProgressBand,
    pub actions: Vec<Action>,
}

/// Progress of one objective with its key-result breakdown
#[derive(Debug, Clone, Serialize)]
pub struct ObjectiveStatus {
    pub id: String,
    pub emoji: String,
    pub title: String,
    pub description: String,
    pub overall_progress: u8,
    pub band: ProgressBand,
    pub key_results: Vec<KeyResultStatus>,
}

/// Headline figures for a site's overview cards
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub site_id: String,
    /// Month the headline figures are taken from
    pub month: Month,
    /// Latest-month revenue across all activities
    pub daily_revenue: f64,
    /// Cumulative revenue over the whole series
    pub annual_revenue: f64,
    pub occupancy_rate: f64,
    pub avg_basket: f64,
}

/// Per-month revenue split by activity, for stacked charts
#[derive(Debug, Clone, Serialize)]
pub struct RevenueBreakdown {
    pub month: Month,
    pub lanes: f64,
    pub bar: f64,
    pub arcade: f64,
    pub billiards: f64,
}

impl Dashboard {
    pub fn new(sites: SiteDirectory, catalog: Catalog) -> Self {
        Self { sites, catalog }
    }

    /// Dashboard over the built-in dataset and catalog
    pub fn seeded() -> Self {
        Self::new(SiteDirectory::seeded(), Catalog::seeded())
    }

    pub fn list_sites(&self) -> Vec<SiteSummary> {
        self.sites.summaries()
    }

    pub fn series(&self, site_id: &str) -> Result<&[MonthlyRecord]> {
        self.sites.series(site_id)
    }

    pub fn metrics(&self) -> &[MetricDefinition] {
        self.catalog.metrics()
    }

    pub fn objectives(&self) -> &[ObjectiveDefinition] {
        self.catalog.objectives()
    }

    /// Latest value + trend of one metric for one site
    pub fn snapshot(&self, site_id: &str, metric_id: &str) -> Result<Snapshot> {
        let series = self.sites.series(site_id)?;
        let metric = self.catalog.metric(metric_id)?;
        let latest = store::latest(series).ok_or(Error::InsufficientData { needed: 1, got: 0 })?;

        let value = engine::value(metric, latest);
        let trend = match engine::trend(metric, series) {
            Ok(t) => Some(t),
            Err(Error::InsufficientData { .. }) | Err(Error::ZeroBaseline) => None,
            Err(e) => return Err(e),
        };

        tracing::debug!(site = site_id, metric = metric_id, value, "Computed snapshot");

        Ok(Snapshot {
            metric_id: metric.id.clone(),
            value,
            formatted: metric.format_value(value),
            trend,
            target: metric.target,
            target_progress: metric.target.map(|t| engine::capped_progress(value, t)),
            target_status: metric.target.map(|t| TargetStatus::of(value, t)),
        })
    }

    /// Period-scoped slice, aggregate, and insights of one metric
    pub fn detail(&self, site_id: &str, metric_id: &str, period: Period) -> Result<MetricDetail> {
        let series = self.sites.series(site_id)?;
        let metric = self.catalog.metric(metric_id)?;

        let slice = engine::slice_by_period(series, period);
        let aggregate = engine::aggregate(metric, slice)?;
        let insights = insight::synthesize(metric, slice, Some(&aggregate));
        let points = slice
            .iter()
            .map(|r| MetricPoint {
                month: r.month,
                value: engine::value(metric, r),
            })
            .collect();

        tracing::debug!(
            site = site_id,
            metric = metric_id,
            period = %period,
            points = slice.len(),
            "Computed metric detail"
        );

        Ok(MetricDetail {
            metric_id: metric.id.clone(),
            period,
            points,
            aggregate,
            insights,
            target: metric.target,
        })
    }

    /// Overall and per-key-result progress of one objective
    pub fn objective_status(&self, objective_id: &str) -> Result<ObjectiveStatus> {
        let objective = self.catalog.objective(objective_id)?;
        let overall = engine::objective_progress(objective);

        let key_results = objective
            .key_results
            .iter()
            .map(|kr| {
                let progress = engine::key_result_progress(kr);
                KeyResultStatus {
                    id: kr.id.clone(),
                    label: kr.label.clone(),
                    current: kr.current,
                    target: kr.target,
                    unit: kr.unit.clone(),
                    progress,
                    band: ProgressBand::classify(progress),
                    actions: kr.actions.clone(),
                }
            })
            .collect();

        tracing::debug!(objective = objective_id, overall, "Computed objective status");

        Ok(ObjectiveStatus {
            id: objective.id.clone(),
            emoji: objective.emoji.clone(),
            title: objective.title.clone(),
            description: objective.description.clone(),
            overall_progress: overall,
            band: ProgressBand::classify(overall),
            key_results,
        })
    }

    /// Headline overview figures for one site
    pub fn summary(&self, site_id: &str) -> Result<Summary> {
        let series = self.sites.series(site_id)?;
        let latest = store::latest(series).ok_or(Error::InsufficientData { needed: 1, got: 0 })?;

        Ok(Summary {
            site_id: site_id.to_string(),
            month: latest.month,
            daily_revenue: latest.total_revenue(),
            annual_revenue: series.iter().map(MonthlyRecord::total_revenue).sum(),
            occupancy_rate: latest.occupancy_rate,
            avg_basket: latest.avg_basket,
        })
    }

    /// Per-month revenue split for the period, oldest first
    pub fn revenue_breakdown(
        &self,
        site_id: &str,
        period: Period,
    ) -> Result<Vec<RevenueBreakdown>> {
        let series = self.sites.series(site_id)?;
        Ok(engine::slice_by_period(series, period)
            .iter()
            .map(|r| RevenueBreakdown {
                month: r.month,
                lanes: r.lane_revenue,
                bar: r.bar_revenue,
                arcade: r.arcade_revenue,
                billiards: r.billiards_revenue,
            })
            .collect())
    }

    /// A freshly simulated occupancy grid
    ///
    /// Simulated decorative data; not derived from the record store.
    pub fn occupancy(&self) -> OccupancyGrid {
        heatmap::generate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insight::InsightKind;

    #[test]
    fn test_list_sites() {
        let dashboard = Dashboard::seeded();
        let sites = dashboard.list_sites();
        assert_eq!(sites.len(), 3);
        assert_eq!(sites[0].id, "lyon");
    }

    #[test]
    fn test_snapshot_of_seeded_revenue() {
        let dashboard = Dashboard::seeded();
        let snapshot = dashboard.snapshot("lyon", "daily-revenue").unwrap();

        // December: 4800 + 3000 + 1100 + 650
        assert_eq!(snapshot.value, 9550.0);
        assert_eq!(snapshot.formatted, "9 550 €");
        // November total is 7140: (9550 − 7140) / 7140 × 100 ≈ 33.8
        let trend = snapshot.trend.unwrap();
        assert!((trend - 33.75).abs() < 0.1, "trend was {}", trend);
        assert_eq!(snapshot.target, Some(10_000.0));
        assert_eq!(snapshot.target_progress, Some(96));
        assert_eq!(snapshot.target_status, Some(TargetStatus::InProgress));
    }

    #[test]
    fn test_snapshot_of_met_target() {
        let dashboard = Dashboard::seeded();
        let snapshot = dashboard.snapshot("lyon", "lane-occupancy").unwrap();
        assert_eq!(snapshot.value, 85.0);
        assert_eq!(snapshot.target_status, Some(TargetStatus::OnTarget));
        assert_eq!(snapshot.target_progress, Some(100));
    }

    #[test]
    fn test_snapshot_without_target_has_no_target_fields() {
        let dashboard = Dashboard::seeded();
        let snapshot = dashboard.snapshot("lyon", "games-per-lane").unwrap();
        assert!(snapshot.target.is_none());
        assert!(snapshot.target_progress.is_none());
        assert!(snapshot.target_status.is_none());
    }

    #[test]
    fn test_snapshot_unknown_ids_fail() {
        let dashboard = Dashboard::seeded();
        assert!(matches!(
            dashboard.snapshot("atlantis", "daily-revenue"),
            Err(Error::UnknownSite(_))
        ));
        assert!(matches!(
            dashboard.snapshot("lyon", "made-up"),
            Err(Error::UnknownMetric(_))
        ));
    }

    #[test]
    fn test_detail_six_month_window() {
        let dashboard = Dashboard::seeded();
        let detail = dashboard
            .detail("lyon", "lane-occupancy", Period::LastSixMonths)
            .unwrap();

        assert_eq!(detail.points.len(), 6);
        assert_eq!(detail.points[0].month, Month::July);
        assert_eq!(detail.points[5].month, Month::December);
        // July holds the window's maximum until December beats it
        assert_eq!(detail.aggregate.max, 85.0);
        assert_eq!(detail.aggregate.max_month, Month::December);
        assert_eq!(detail.aggregate.min_month, Month::November);
        assert_eq!(detail.insights.len(), 3);
    }

    #[test]
    fn test_detail_single_month_window_has_only_target_insight() {
        let dashboard = Dashboard::seeded();
        let detail = dashboard
            .detail("lyon", "daily-revenue", Period::LastMonth)
            .unwrap();
        assert_eq!(detail.points.len(), 1);
        assert_eq!(detail.insights.len(), 1);
        assert_eq!(detail.insights[0].kind, InsightKind::TargetGap);
    }

    #[test]
    fn test_objective_status() {
        let dashboard = Dashboard::seeded();
        let status = dashboard.objective_status("obj-2").unwrap();

        // Capped progresses [100, 67, 60] → 76
        assert_eq!(status.overall_progress, 76);
        assert_eq!(status.band, ProgressBand::Mid);
        assert_eq!(status.key_results.len(), 3);
        assert_eq!(status.key_results[0].progress, 100);
        assert_eq!(status.key_results[0].band, ProgressBand::High);
        assert!(status.key_results[0].actions[0].done);

        assert!(matches!(
            dashboard.objective_status("obj-42"),
            Err(Error::UnknownObjective(_))
        ));
    }

    #[test]
    fn test_summary() {
        let dashboard = Dashboard::seeded();
        let summary = dashboard.summary("lyon").unwrap();
        assert_eq!(summary.month, Month::December);
        assert_eq!(summary.daily_revenue, 9550.0);
        assert_eq!(summary.occupancy_rate, 85.0);
        assert_eq!(summary.avg_basket, 34.0);
        // Annual total exceeds any single month's figure twelvefold-ish
        assert!(summary.annual_revenue > 80_000.0);
    }

    #[test]
    fn test_revenue_breakdown_window() {
        let dashboard = Dashboard::seeded();
        let breakdown = dashboard
            .revenue_breakdown("lyon", Period::LastSixMonths)
            .unwrap();
        assert_eq!(breakdown.len(), 6);
        assert_eq!(breakdown[5].month, Month::December);
        assert_eq!(breakdown[5].lanes, 4800.0);
        assert_eq!(breakdown[5].billiards, 650.0);
    }

    #[test]
    fn test_occupancy_grid_bounds() {
        let dashboard = Dashboard::seeded();
        let grid = dashboard.occupancy();
        for row in grid.cells() {
            for &cell in row {
                assert!(cell <= 100);
            }
        }
    }
}
