//! Metric and objective catalog
//!
//! The catalog is an immutable configuration object built once at process
//! start and passed by reference into the engine and presentation layers.
//! [`Catalog::seeded`] carries the nine operational KPIs and four strategic
//! objectives the dashboard ships with.

use crate::error::{Error, Result};
use crate::models::{
    Action, Field, Formatter, KeyResult, MetricDefinition, MetricExpr, ObjectiveDefinition, Unit,
};

/// Arcade + billiards revenue capacity used for the annex utilization rate
const ANNEX_CAPACITY: f64 = 1500.0 + 800.0;

/// Number of bowling lanes per site
const LANE_COUNT: f64 = 8.0;

/// Average monthly customer visits used for per-visit annex revenue
const VISITS_PER_MONTH: f64 = 150.0;

/// Enumerable, id-addressable metric and objective definitions
#[derive(Debug, Clone)]
pub struct Catalog {
    metrics: Vec<MetricDefinition>,
    objectives: Vec<ObjectiveDefinition>,
}

impl Catalog {
    pub fn new(metrics: Vec<MetricDefinition>, objectives: Vec<ObjectiveDefinition>) -> Self {
        Self {
            metrics,
            objectives,
        }
    }

    /// The built-in KPI and OKR configuration
    pub fn seeded() -> Self {
        Self::new(seeded_metrics(), seeded_objectives())
    }

    pub fn metrics(&self) -> &[MetricDefinition] {
        &self.metrics
    }

    pub fn objectives(&self) -> &[ObjectiveDefinition] {
        &self.objectives
    }

    /// Look up a metric by id
    pub fn metric(&self, id: &str) -> Result<&MetricDefinition> {
        self.metrics
            .iter()
            .find(|m| m.id == id)
            .ok_or_else(|| Error::UnknownMetric(id.to_string()))
    }

    /// Look up an objective by id
    pub fn objective(&self, id: &str) -> Result<&ObjectiveDefinition> {
        self.objectives
            .iter()
            .find(|o| o.id == id)
            .ok_or_else(|| Error::UnknownObjective(id.to_string()))
    }
}

fn metric(
    id: &str,
    label: &str,
    description: &str,
    unit: Unit,
    expr: MetricExpr,
    target: Option<f64>,
    formatter: Option<Formatter>,
) -> MetricDefinition {
    MetricDefinition {
        id: id.to_string(),
        label: label.to_string(),
        description: description.to_string(),
        unit,
        expr,
        target,
        formatter,
    }
}

fn seeded_metrics() -> Vec<MetricDefinition> {
    vec![
        metric(
            "daily-revenue",
            "Daily revenue",
            "Revenue per day across all activities",
            Unit::Euro,
            MetricExpr::TotalRevenue,
            Some(10_000.0),
            Some(Formatter::Euro),
        ),
        metric(
            "lane-occupancy",
            "Lane occupancy rate",
            "Share of bowling lane capacity in use",
            Unit::Percent,
            MetricExpr::Field(Field::OccupancyRate),
            Some(70.0),
            Some(Formatter::Percent),
        ),
        metric(
            "annex-utilization",
            "Annex utilization rate",
            "Utilization of the arcade and billiards areas",
            Unit::Percent,
            MetricExpr::FixedRatio {
                fields: vec![Field::ArcadeRevenue, Field::BilliardsRevenue],
                divisor: ANNEX_CAPACITY,
                scale: 100.0,
                decimals: 0,
            },
            Some(60.0),
            Some(Formatter::Percent),
        ),
        metric(
            "games-per-lane",
            "Games per lane per day",
            "Average games played per lane per day",
            Unit::Count,
            MetricExpr::FixedRatio {
                fields: vec![Field::LaneRevenue],
                divisor: LANE_COUNT,
                scale: 1.0,
                decimals: 1,
            },
            None,
            Some(Formatter::Decimal(1)),
        ),
        metric(
            "avg-basket",
            "Average basket",
            "Average spend per customer visit",
            Unit::Euro,
            MetricExpr::Field(Field::AvgBasket),
            Some(24.0),
            Some(Formatter::Euro),
        ),
        metric(
            "bar-attach-rate",
            "Bar attach rate",
            "Share of customers ordering at the bar",
            Unit::Percent,
            MetricExpr::RevenueShare(Field::BarRevenue),
            Some(65.0),
            Some(Formatter::Percent),
        ),
        metric(
            "annex-revenue-per-visit",
            "Annex revenue per visit",
            "Average annex revenue per customer visit",
            Unit::Euro,
            MetricExpr::FixedRatio {
                fields: vec![Field::ArcadeRevenue, Field::BilliardsRevenue],
                divisor: VISITS_PER_MONTH,
                scale: 1.0,
                decimals: 2,
            },
            None,
            Some(Formatter::Euro),
        ),
        metric(
            "club-revenue-share",
            "Club revenue share",
            "Share of revenue generated by clubs and leagues",
            Unit::Percent,
            MetricExpr::Field(Field::ClubShare),
            Some(30.0),
            Some(Formatter::Percent),
        ),
        metric(
            "returning-rate",
            "Returning customer rate",
            "Share of customers returning within 30 days",
            Unit::Percent,
            MetricExpr::Affine {
                field: Field::ClubShare,
                factor: 1.2,
                offset: 10.0,
            },
            Some(40.0),
            Some(Formatter::Percent),
        ),
    ]
}

fn key_result(
    id: &str,
    label: &str,
    current: f64,
    target: f64,
    unit: &str,
    actions: &[&str],
) -> KeyResult {
    KeyResult {
        id: id.to_string(),
        label: label.to_string(),
        current,
        target,
        unit: unit.to_string(),
        actions: actions.iter().map(|a| Action::from_label(a)).collect(),
    }
}

fn objective(
    id: &str,
    emoji: &str,
    title: &str,
    description: &str,
    key_results: Vec<KeyResult>,
) -> ObjectiveDefinition {
    ObjectiveDefinition {
        id: id.to_string(),
        emoji: emoji.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        key_results,
    }
}

fn seeded_objectives() -> Vec<ObjectiveDefinition> {
    vec![
        objective(
            "obj-1",
            "🎯",
            "Identify and consolidate the core business",
            "Understand each activity's contribution and prioritize investments",
            vec![
                key_result(
                    "kr-1-1",
                    "Measure each activity's revenue contribution within 3 months",
                    85.0,
                    100.0,
                    "%",
                    &[
                        "Per-activity revenue tracking in place ✅",
                        "Revenue split dashboard in progress",
                        "Automated monthly report to finalize",
                    ],
                ),
                key_result(
                    "kr-1-2",
                    "Identify the activity with the best net margin",
                    60.0,
                    100.0,
                    "%",
                    &[
                        "Per-activity cost collection in progress",
                        "Variable cost analysis to complete",
                        "Net margin per activity to finalize",
                    ],
                ),
                key_result(
                    "kr-1-3",
                    "Define a prioritized investment plan",
                    30.0,
                    100.0,
                    "%",
                    &[
                        "Investment areas identified",
                        "Cost out the required investments",
                        "Validate the plan with management",
                    ],
                ),
            ],
        ),
        objective(
            "obj-2",
            "🏗️",
            "Optimize infrastructure profitability",
            "Maximize lane utilization and shrink the off-peak troughs",
            vec![
                key_result(
                    "kr-2-1",
                    "Reach a 70% average lane occupancy rate",
                    71.0,
                    70.0,
                    "%",
                    &[
                        "Dynamic off-peak pricing ✅",
                        "Corporate partnership offers ✅",
                        "Student weekday offers launched",
                    ],
                ),
                key_result(
                    "kr-2-2",
                    "Grow revenue per lane by 15%",
                    10.0,
                    15.0,
                    "%",
                    &[
                        "Drink upsells during games",
                        "Premium packages with shoe rental included",
                        "Themed weekend events",
                    ],
                ),
                key_result(
                    "kr-2-3",
                    "Cut under-occupied time slots by 20%",
                    12.0,
                    20.0,
                    "%",
                    &[
                        "Mapped the under-occupied slots ✅",
                        "Happy-hour bowling 2pm-5pm",
                        "Friday late-night bowling",
                    ],
                ),
            ],
        ),
        objective(
            "obj-3",
            "💰",
            "Increase spend per customer",
            "Grow the average basket and the bar attach rate",
            vec![
                key_result(
                    "kr-3-1",
                    "Raise the average basket from 18 € to 24 €",
                    27.0,
                    24.0,
                    "€",
                    &[
                        "New snacking menu ✅",
                        "Personalized till suggestions",
                        "Duo and family bundles launched",
                    ],
                ),
                key_result(
                    "kr-3-2",
                    "Reach 65% of customers ordering at the bar",
                    58.0,
                    65.0,
                    "%",
                    &[
                        "Digital promotion displays ✅",
                        "At-lane drink service to trial",
                        "Signature cocktails to develop",
                    ],
                ),
                key_result(
                    "kr-3-3",
                    "Create 3 packaged offers (bowling + drink + arcade)",
                    2.0,
                    3.0,
                    "offers",
                    &[
                        "Family pack (2h bowling + 4 drinks + 10 tokens) ✅",
                        "Night pack (1h bowling + cocktail + unlimited arcade) ✅",
                        "Student pack to design",
                    ],
                ),
            ],
        ),
        objective(
            "obj-4",
            "🔄",
            "Grow club play and repeat business",
            "Retain customers and raise the recurring revenue share",
            vec![
                key_result(
                    "kr-4-1",
                    "Grow licensed club members by 25%",
                    15.0,
                    25.0,
                    "%",
                    &[
                        "Monthly open-house days",
                        "Preferential member rates ✅",
                        "Social media outreach",
                    ],
                ),
                key_result(
                    "kr-4-2",
                    "Generate 30% of revenue from returning customers",
                    22.0,
                    30.0,
                    "%",
                    &[
                        "Returning customers identified ✅",
                        "Loyalty offers in progress",
                        "Monthly memberships to launch",
                    ],
                ),
                key_result(
                    "kr-4-3",
                    "Stand up a loyalty program",
                    40.0,
                    100.0,
                    "%",
                    &[
                        "Benchmarked competitor programs ✅",
                        "Requirements written up ✅",
                        "App development in progress",
                    ],
                ),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_catalog_shape() {
        let catalog = Catalog::seeded();
        assert_eq!(catalog.metrics().len(), 9);
        assert_eq!(catalog.objectives().len(), 4);
    }

    #[test]
    fn test_metric_lookup() {
        let catalog = Catalog::seeded();
        let occupancy = catalog.metric("lane-occupancy").unwrap();
        assert_eq!(occupancy.unit, Unit::Percent);
        assert_eq!(occupancy.target, Some(70.0));

        assert!(matches!(
            catalog.metric("nope"),
            Err(Error::UnknownMetric(_))
        ));
    }

    #[test]
    fn test_objective_lookup_and_ingested_actions() {
        let catalog = Catalog::seeded();
        let obj = catalog.objective("obj-2").unwrap();
        assert_eq!(obj.key_results.len(), 3);

        // Done markers are stripped at ingestion, never stored in the text
        let kr = &obj.key_results[0];
        assert!(kr.actions[0].done);
        assert!(!kr.actions[0].text.contains('✅'));
        assert!(!kr.actions[2].done);

        assert!(matches!(
            catalog.objective("obj-9"),
            Err(Error::UnknownObjective(_))
        ));
    }

    #[test]
    fn test_every_percent_metric_has_percent_formatter() {
        let catalog = Catalog::seeded();
        for m in catalog.metrics() {
            if m.unit == Unit::Percent {
                assert_eq!(m.formatter, Some(Formatter::Percent), "metric {}", m.id);
            }
        }
    }
}
