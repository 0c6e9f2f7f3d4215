//! Insight synthesizer
//!
//! Turns a metric's period aggregate into short ready-to-render facts: the
//! best and weakest months of the window and how far the latest value sits
//! from the metric's target. Facts whose preconditions do not hold are
//! omitted individually rather than rendered with placeholders.

use serde::Serialize;

use crate::engine::{self, Aggregate};
use crate::models::{MetricDefinition, MonthlyRecord};
use crate::store;

/// What kind of fact an insight states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    BestMonth,
    WeakestMonth,
    TargetMet,
    TargetGap,
}

/// A short synthesized fact about a metric over a period
#[derive(Debug, Clone, Serialize)]
pub struct Insight {
    pub kind: InsightKind,
    /// Ready-to-render sentence
    pub text: String,
}

impl Insight {
    fn new(kind: InsightKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Build the insight list for a metric over its sliced series
///
/// Best/weakest facts need a multi-point window and its aggregate; the
/// target fact needs a target on the metric. Anything whose precondition
/// fails is simply absent.
pub fn synthesize(
    metric: &MetricDefinition,
    slice: &[MonthlyRecord],
    aggregate: Option<&Aggregate>,
) -> Vec<Insight> {
    let mut insights = Vec::with_capacity(3);

    if slice.len() > 1 {
        if let Some(agg) = aggregate {
            insights.push(Insight::new(
                InsightKind::BestMonth,
                format!(
                    "Best month: {} ({})",
                    agg.max_month,
                    metric.format_value(agg.max)
                ),
            ));
            insights.push(Insight::new(
                InsightKind::WeakestMonth,
                format!(
                    "Weakest month: {} ({})",
                    agg.min_month,
                    metric.format_value(agg.min)
                ),
            ));
        }
    }

    if let (Some(target), Some(latest)) = (metric.target, store::latest(slice)) {
        let current = engine::value(metric, latest);
        if current >= target {
            insights.push(Insight::new(InsightKind::TargetMet, "Target met"));
        } else {
            insights.push(Insight::new(
                InsightKind::TargetGap,
                format!(
                    "{} remaining to reach the target",
                    metric.format_value(target - current)
                ),
            ));
        }
    }

    insights
}
