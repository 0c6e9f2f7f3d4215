//! Lanescope Core Library
//!
//! Analytics engine for the Lanescope multi-site KPI/OKR dashboard:
//! - Record store holding each site's monthly operational series
//! - Declarative metric catalog and objective (OKR) definitions
//! - Derivation engine for values, trends, period slices, and aggregates
//! - Insight synthesizer turning aggregates into display-ready facts
//! - Occupancy heatmap simulator (decorative, simulated data)
//! - Dashboard facade tying the above together for presentation layers
//!
//! Everything is a pure, stateless transformation over immutable in-memory
//! data; there is no persistence, no I/O, and no caching.

pub mod catalog;
pub mod dashboard;
pub mod engine;
pub mod error;
pub mod heatmap;
pub mod insight;
pub mod models;
pub mod store;

pub use catalog::Catalog;
pub use dashboard::{
    Dashboard, KeyResultStatus, MetricDetail, MetricPoint, ObjectiveStatus, RevenueBreakdown,
    Snapshot, Summary,
};
pub use engine::{Aggregate, ProgressBand, TargetStatus};
pub use error::{Error, Result};
pub use heatmap::OccupancyGrid;
pub use insight::{Insight, InsightKind};
pub use models::{
    Action, Field, Formatter, KeyResult, MetricDefinition, MetricExpr, Month, MonthlyRecord,
    ObjectiveDefinition, Period, Site, SiteSummary, Unit,
};
pub use store::SiteDirectory;
