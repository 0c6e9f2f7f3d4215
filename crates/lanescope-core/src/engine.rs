//! Derivation engine
//!
//! Pure functions turning records and catalog definitions into metric
//! values, period-over-period trends, trailing-window slices, aggregate
//! statistics, and objective progress. Everything here is stateless and
//! recomputed from scratch on every call; short or empty series produce
//! explicit error values, never panics or non-finite floats.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::models::{
    KeyResult, MetricDefinition, MetricExpr, Month, MonthlyRecord, ObjectiveDefinition, Period,
};
use crate::store;

/// Evaluate a metric's accessor for one record
///
/// Total for every well-formed record: a revenue share against an all-zero
/// record reads as 0 rather than dividing by zero.
pub fn value(metric: &MetricDefinition, record: &MonthlyRecord) -> f64 {
    evaluate(&metric.expr, record)
}

fn evaluate(expr: &MetricExpr, record: &MonthlyRecord) -> f64 {
    match expr {
        MetricExpr::Field(field) => record.field(*field),
        MetricExpr::TotalRevenue => record.total_revenue(),
        MetricExpr::FixedRatio {
            fields,
            divisor,
            scale,
            decimals,
        } => {
            let sum: f64 = fields.iter().map(|f| record.field(*f)).sum();
            round_to(sum / divisor * scale, *decimals)
        }
        MetricExpr::RevenueShare(field) => {
            let total = record.total_revenue();
            if total == 0.0 {
                return 0.0;
            }
            (record.field(*field) / total * 100.0).round()
        }
        MetricExpr::Affine {
            field,
            factor,
            offset,
        } => (record.field(*field) * factor + offset).round(),
    }
}

fn round_to(value: f64, decimals: u8) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Percentage change of a metric between the two most recent records
///
/// `Err(InsufficientData)` below two records; `Err(ZeroBaseline)` when the
/// previous value is zero, since a percentage against zero is undefined.
pub fn trend(metric: &MetricDefinition, series: &[MonthlyRecord]) -> Result<f64> {
    let (latest, previous) = match (store::latest(series), store::previous(series)) {
        (Some(latest), Some(previous)) => (latest, previous),
        _ => {
            return Err(Error::InsufficientData {
                needed: 2,
                got: series.len(),
            })
        }
    };
    let base = value(metric, previous);
    if base == 0.0 {
        return Err(Error::ZeroBaseline);
    }
    Ok((value(metric, latest) - base) / base * 100.0)
}

/// Trailing window of a series
///
/// Takes the final N chronological elements of whatever series is supplied
/// (not a calendar-aligned window). Never empty for non-empty input, never
/// reorders.
pub fn slice_by_period<T>(series: &[T], period: Period) -> &[T] {
    match period.months() {
        Some(n) if n < series.len() => &series[series.len() - n..],
        _ => series,
    }
}

/// Aggregate statistics of a metric over a series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregate {
    pub max: f64,
    /// Month of the maximum; earliest month wins on ties
    pub max_month: Month,
    pub min: f64,
    /// Month of the minimum; earliest month wins on ties
    pub min_month: Month,
    /// Arithmetic mean, rounded to the nearest integer for display
    pub avg: f64,
}

/// Min/max/avg of a metric over a series, with the months at the extrema
pub fn aggregate(metric: &MetricDefinition, series: &[MonthlyRecord]) -> Result<Aggregate> {
    let first = series.first().ok_or(Error::InsufficientData {
        needed: 1,
        got: 0,
    })?;

    let mut max = value(metric, first);
    let mut max_month = first.month;
    let mut min = max;
    let mut min_month = first.month;
    let mut sum = max;

    for record in &series[1..] {
        let v = value(metric, record);
        sum += v;
        if v > max {
            max = v;
            max_month = record.month;
        }
        if v < min {
            min = v;
            min_month = record.month;
        }
    }

    Ok(Aggregate {
        max,
        max_month,
        min,
        min_month,
        avg: (sum / series.len() as f64).round(),
    })
}

/// Progress toward a target: `min(100, current/target × 100)`, rounded
///
/// Over-achievement is capped at 100. A non-positive target counts as met.
pub fn capped_progress(current: f64, target: f64) -> u8 {
    if target <= 0.0 {
        return 100;
    }
    (current / target * 100.0).clamp(0.0, 100.0).round() as u8
}

/// Per-key-result progress, capped at 100 so one runaway key result cannot
/// mask underperforming siblings when averaged
pub fn key_result_progress(kr: &KeyResult) -> u8 {
    capped_progress(kr.current, kr.target)
}

/// Overall objective progress: the integer mean of its key results'
/// capped per-result progress (not the ratio of sums)
pub fn objective_progress(objective: &ObjectiveDefinition) -> u8 {
    if objective.key_results.is_empty() {
        return 0;
    }
    let sum: u32 = objective
        .key_results
        .iter()
        .map(|kr| key_result_progress(kr) as u32)
        .sum();
    (sum as f64 / objective.key_results.len() as f64).round() as u8
}

/// Tiered band for progress-style percentages (objectives, key results)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressBand {
    /// Below 50
    Low,
    /// 50 to 79
    Mid,
    /// 80 and above
    High,
}

impl ProgressBand {
    pub fn classify(pct: u8) -> Self {
        match pct {
            0..=49 => ProgressBand::Low,
            50..=79 => ProgressBand::Mid,
            _ => ProgressBand::High,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProgressBand::Low => "low",
            ProgressBand::Mid => "mid",
            ProgressBand::High => "high",
        }
    }
}

impl std::fmt::Display for ProgressBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Metric-vs-target status: on target iff the value has reached the target
///
/// Distinct from [`ProgressBand`]; the two rules are never interchangeable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetStatus {
    OnTarget,
    InProgress,
}

impl TargetStatus {
    pub fn of(value: f64, target: f64) -> Self {
        if value >= target {
            TargetStatus::OnTarget
        } else {
            TargetStatus::InProgress
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TargetStatus::OnTarget => "on_target",
            TargetStatus::InProgress => "in_progress",
        }
    }
}

impl std::fmt::Display for TargetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::models::{Action, Field, Formatter, Unit};
    use crate::store::SiteDirectory;

    fn record(month: Month, lanes: f64, bar: f64, arcade: f64, billiards: f64) -> MonthlyRecord {
        MonthlyRecord {
            month,
            lane_revenue: lanes,
            bar_revenue: bar,
            arcade_revenue: arcade,
            billiards_revenue: billiards,
            occupancy_rate: 58.0,
            avg_basket: 24.0,
            club_revenue_share: 22.0,
        }
    }

    fn kr(current: f64, target: f64) -> KeyResult {
        KeyResult {
            id: "kr-test".to_string(),
            label: "Test".to_string(),
            current,
            target,
            unit: "%".to_string(),
            actions: vec![],
        }
    }

    fn revenue_metric() -> MetricDefinition {
        MetricDefinition {
            id: "daily-revenue".to_string(),
            label: "Daily revenue".to_string(),
            description: String::new(),
            unit: Unit::Euro,
            expr: MetricExpr::TotalRevenue,
            target: Some(10_000.0),
            formatter: Some(Formatter::Euro),
        }
    }

    #[test]
    fn test_value_is_total_for_every_seeded_metric() {
        let catalog = Catalog::seeded();
        let directory = SiteDirectory::seeded();
        for site in directory.sites() {
            for record in &site.records {
                for metric in catalog.metrics() {
                    let v = value(metric, record);
                    assert!(v.is_finite(), "{} on {}", metric.id, record.month);
                }
            }
        }
    }

    #[test]
    fn test_expression_evaluation() {
        let r = record(Month::December, 4800.0, 3000.0, 1100.0, 650.0);

        assert_eq!(
            evaluate(&MetricExpr::Field(Field::OccupancyRate), &r),
            58.0
        );
        assert_eq!(evaluate(&MetricExpr::TotalRevenue, &r), 9550.0);

        // (1100 + 650) / 2300 × 100 = 76.08…, rounded to 76
        let annex = MetricExpr::FixedRatio {
            fields: vec![Field::ArcadeRevenue, Field::BilliardsRevenue],
            divisor: 2300.0,
            scale: 100.0,
            decimals: 0,
        };
        assert_eq!(evaluate(&annex, &r), 76.0);

        // 4800 / 8 = 600.0, one decimal place
        let per_lane = MetricExpr::FixedRatio {
            fields: vec![Field::LaneRevenue],
            divisor: 8.0,
            scale: 1.0,
            decimals: 1,
        };
        assert_eq!(evaluate(&per_lane, &r), 600.0);

        // 3000 / 9550 × 100 = 31.4…, rounded to 31
        assert_eq!(evaluate(&MetricExpr::RevenueShare(Field::BarRevenue), &r), 31.0);

        // 22 × 1.2 + 10 = 36.4, rounded to 36
        let returning = MetricExpr::Affine {
            field: Field::ClubShare,
            factor: 1.2,
            offset: 10.0,
        };
        assert_eq!(evaluate(&returning, &r), 36.0);
    }

    #[test]
    fn test_revenue_share_of_all_zero_record_is_zero() {
        let r = record(Month::January, 0.0, 0.0, 0.0, 0.0);
        assert_eq!(evaluate(&MetricExpr::RevenueShare(Field::BarRevenue), &r), 0.0);
    }

    #[test]
    fn test_trend_two_record_example() {
        let series = vec![
            record(Month::January, 3200.0, 1800.0, 650.0, 400.0),
            record(Month::February, 4800.0, 1900.0, 850.0, 650.0),
        ];
        // totals 6050 and 8200: (8200 − 6050) / 6050 × 100 ≈ 35.5
        let t = trend(&revenue_metric(), &series).unwrap();
        assert!((t - 35.537).abs() < 0.01, "trend was {}", t);
    }

    #[test]
    fn test_trend_requires_two_records() {
        let series = vec![record(Month::January, 3200.0, 1800.0, 650.0, 400.0)];
        assert!(matches!(
            trend(&revenue_metric(), &series),
            Err(Error::InsufficientData { needed: 2, got: 1 })
        ));
        assert!(matches!(
            trend(&revenue_metric(), &[]),
            Err(Error::InsufficientData { needed: 2, got: 0 })
        ));
    }

    #[test]
    fn test_trend_zero_baseline_is_explicit() {
        let series = vec![
            record(Month::January, 0.0, 0.0, 0.0, 0.0),
            record(Month::February, 4800.0, 1900.0, 850.0, 650.0),
        ];
        assert!(matches!(
            trend(&revenue_metric(), &series),
            Err(Error::ZeroBaseline)
        ));
    }

    #[test]
    fn test_slice_full_year_returns_input_unchanged() {
        let directory = SiteDirectory::seeded();
        let series = directory.series("lyon").unwrap();
        assert_eq!(slice_by_period(series, Period::FullYear).len(), 12);

        let short = &series[..3];
        assert_eq!(slice_by_period(short, Period::FullYear).len(), 3);
        // Also when the window exceeds the series
        assert_eq!(slice_by_period(short, Period::LastSixMonths).len(), 3);
    }

    #[test]
    fn test_slice_last_month_is_final_record() {
        let directory = SiteDirectory::seeded();
        let series = directory.series("lyon").unwrap();
        let sliced = slice_by_period(series, Period::LastMonth);
        assert_eq!(sliced.len(), 1);
        assert_eq!(sliced[0].month, Month::December);
    }

    #[test]
    fn test_slice_six_months_keeps_order() {
        let directory = SiteDirectory::seeded();
        let series = directory.series("lyon").unwrap();
        let sliced = slice_by_period(series, Period::LastSixMonths);
        assert_eq!(sliced.len(), 6);
        assert_eq!(sliced[0].month, Month::July);
        assert_eq!(sliced[5].month, Month::December);
    }

    #[test]
    fn test_aggregate_over_seeded_year() {
        let catalog = Catalog::seeded();
        let directory = SiteDirectory::seeded();
        let series = directory.series("lyon").unwrap();
        let occupancy = catalog.metric("lane-occupancy").unwrap();

        let agg = aggregate(occupancy, series).unwrap();
        assert_eq!(agg.max, 85.0);
        assert_eq!(agg.max_month, Month::December);
        assert_eq!(agg.min, 58.0);
        assert_eq!(agg.min_month, Month::January);
        // (58+62+65+68+72+75+80+78+70+74+67+85) / 12 = 71.17 → 71
        assert_eq!(agg.avg, 71.0);
    }

    #[test]
    fn test_aggregate_ties_break_to_earliest_month() {
        let series = vec![
            record(Month::January, 1000.0, 0.0, 0.0, 0.0),
            record(Month::February, 2000.0, 0.0, 0.0, 0.0),
            record(Month::March, 2000.0, 0.0, 0.0, 0.0),
            record(Month::April, 1000.0, 0.0, 0.0, 0.0),
        ];
        let agg = aggregate(&revenue_metric(), &series).unwrap();
        assert_eq!(agg.max_month, Month::February);
        assert_eq!(agg.min_month, Month::January);
    }

    #[test]
    fn test_aggregate_rejects_empty_series() {
        assert!(matches!(
            aggregate(&revenue_metric(), &[]),
            Err(Error::InsufficientData { needed: 1, got: 0 })
        ));
    }

    #[test]
    fn test_key_result_progress_caps_overachievement() {
        // 71/70 would be 101.4% uncapped
        assert_eq!(key_result_progress(&kr(71.0, 70.0)), 100);
        assert_eq!(key_result_progress(&kr(10.0, 15.0)), 67);
        assert_eq!(key_result_progress(&kr(12.0, 20.0)), 60);
        assert_eq!(key_result_progress(&kr(0.0, 20.0)), 0);
    }

    #[test]
    fn test_objective_progress_is_mean_of_capped_progresses() {
        let objective = ObjectiveDefinition {
            id: "obj-test".to_string(),
            emoji: "🎯".to_string(),
            title: "Test".to_string(),
            description: String::new(),
            key_results: vec![kr(71.0, 70.0), kr(10.0, 15.0), kr(12.0, 20.0)],
        };
        // Capped progresses [100, 67, 60] → round(227/3) = 76
        assert_eq!(objective_progress(&objective), 76);
    }

    #[test]
    fn test_objective_progress_bounds() {
        let wild = ObjectiveDefinition {
            id: "obj-wild".to_string(),
            emoji: "🎯".to_string(),
            title: "Test".to_string(),
            description: String::new(),
            key_results: vec![kr(5000.0, 10.0), kr(0.0, 100.0)],
        };
        let progress = objective_progress(&wild);
        assert!(progress <= 100);
        assert_eq!(progress, 50);
    }

    #[test]
    fn test_progress_bands() {
        assert_eq!(ProgressBand::classify(0), ProgressBand::Low);
        assert_eq!(ProgressBand::classify(49), ProgressBand::Low);
        assert_eq!(ProgressBand::classify(50), ProgressBand::Mid);
        assert_eq!(ProgressBand::classify(79), ProgressBand::Mid);
        assert_eq!(ProgressBand::classify(80), ProgressBand::High);
        assert_eq!(ProgressBand::classify(100), ProgressBand::High);
    }

    #[test]
    fn test_target_status_is_met_at_exact_target() {
        assert_eq!(TargetStatus::of(70.0, 70.0), TargetStatus::OnTarget);
        assert_eq!(TargetStatus::of(69.9, 70.0), TargetStatus::InProgress);
    }

    #[test]
    fn test_actions_do_not_affect_progress() {
        let mut with_actions = kr(10.0, 20.0);
        with_actions.actions = vec![Action::from_label("Something ✅")];
        assert_eq!(
            key_result_progress(&with_actions),
            key_result_progress(&kr(10.0, 20.0))
        );
    }
}
