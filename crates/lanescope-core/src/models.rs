//! Domain models for Lanescope

use serde::{Deserialize, Serialize};

/// Calendar month, used as the label axis of every series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    /// All twelve months in calendar order
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        }
    }

    /// Three-letter abbreviation for chart axis labels
    pub fn abbrev(&self) -> &'static str {
        &self.as_str()[..3]
    }

    /// Zero-based position in the calendar year
    pub fn index(&self) -> usize {
        Month::ALL.iter().position(|m| m == self).unwrap_or(0)
    }
}

impl std::fmt::Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Month {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Month::ALL
            .iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| format!("Unknown month: {}", s))
    }
}

/// One calendar month's operational facts for one site
///
/// Immutable once constructed; a full-year series is twelve records in
/// calendar order with no gaps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRecord {
    pub month: Month,
    /// Lane (bowling) revenue in EUR
    pub lane_revenue: f64,
    /// Bar and food revenue in EUR
    pub bar_revenue: f64,
    /// Arcade revenue in EUR
    pub arcade_revenue: f64,
    /// Billiards revenue in EUR
    pub billiards_revenue: f64,
    /// Lane occupancy rate, 0-100
    pub occupancy_rate: f64,
    /// Average spend per customer visit in EUR
    pub avg_basket: f64,
    /// Share of revenue from clubs and leagues, 0-100
    pub club_revenue_share: f64,
}

impl MonthlyRecord {
    /// Revenue across all four activity streams
    pub fn total_revenue(&self) -> f64 {
        self.lane_revenue + self.bar_revenue + self.arcade_revenue + self.billiards_revenue
    }

    /// Read one stored field by selector
    pub fn field(&self, field: Field) -> f64 {
        match field {
            Field::LaneRevenue => self.lane_revenue,
            Field::BarRevenue => self.bar_revenue,
            Field::ArcadeRevenue => self.arcade_revenue,
            Field::BilliardsRevenue => self.billiards_revenue,
            Field::OccupancyRate => self.occupancy_rate,
            Field::AvgBasket => self.avg_basket,
            Field::ClubShare => self.club_revenue_share,
        }
    }
}

/// Selector for a stored field of a [`MonthlyRecord`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    LaneRevenue,
    BarRevenue,
    ArcadeRevenue,
    BilliardsRevenue,
    OccupancyRate,
    AvgBasket,
    ClubShare,
}

/// A bowling center with its owned monthly series
///
/// Sites are independent; no cross-site aggregation exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Site {
    /// Stable identifier (e.g. "lyon")
    pub id: String,
    /// Display label (e.g. "LaneScope Lyon")
    pub label: String,
    /// City the site operates in
    pub city: String,
    /// Monthly records in calendar order
    pub records: Vec<MonthlyRecord>,
}

/// Site identity without its series, for site pickers
#[derive(Debug, Clone, Serialize)]
pub struct SiteSummary {
    pub id: String,
    pub label: String,
    pub city: String,
}

/// Trailing analysis window over a monthly series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Period {
    /// The most recent record only
    #[serde(rename = "1m")]
    LastMonth,
    /// The six most recent records
    #[serde(rename = "6m")]
    LastSixMonths,
    /// Everything available
    #[serde(rename = "1y")]
    FullYear,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::LastMonth => "1m",
            Period::LastSixMonths => "6m",
            Period::FullYear => "1y",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Period::LastMonth => "1 month",
            Period::LastSixMonths => "6 months",
            Period::FullYear => "1 year",
        }
    }

    /// Window length in months; `None` means the whole series
    pub fn months(&self) -> Option<usize> {
        match self {
            Period::LastMonth => Some(1),
            Period::LastSixMonths => Some(6),
            Period::FullYear => None,
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "1m" => Ok(Period::LastMonth),
            "6m" => Ok(Period::LastSixMonths),
            "1y" | "12m" => Ok(Period::FullYear),
            _ => Err(format!("Unknown period: {}", s)),
        }
    }
}

/// Unit tag for a metric's values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// Percentage, 0-100 by construction of the accessor
    Percent,
    /// Euro amount, unbounded
    Euro,
    /// Dimensionless count, unbounded
    Count,
}

/// Display formatter for metric values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Formatter {
    /// Grouped integer with a euro suffix, e.g. "12 350 €"
    Euro,
    /// Integer percentage, e.g. "58%"
    Percent,
    /// Fixed decimal places, e.g. "4.5"
    Decimal(u8),
}

impl Formatter {
    /// Render a value for display
    pub fn format(&self, value: f64) -> String {
        match self {
            Formatter::Euro => format!("{} €", group_thousands(value.round() as i64)),
            Formatter::Percent => format!("{}%", value.round() as i64),
            Formatter::Decimal(places) => format!("{:.*}", *places as usize, value),
        }
    }
}

/// Group an integer into thousands separated by spaces ("12350" -> "12 350")
fn group_thousands(value: i64) -> String {
    let negative = value < 0;
    let digits = value.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }
    if negative {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Declarative metric accessor: how a metric value is derived from a record
///
/// Keeping the derivation as data rather than a closure makes the catalog
/// independently inspectable and testable.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricExpr {
    /// A stored field, verbatim
    Field(Field),
    /// Sum of the four revenue streams
    TotalRevenue,
    /// Sum of the named revenue fields over a fixed capacity constant,
    /// scaled and rounded
    FixedRatio {
        fields: Vec<Field>,
        divisor: f64,
        scale: f64,
        decimals: u8,
    },
    /// One revenue stream as an integer percentage of total revenue
    RevenueShare(Field),
    /// Affine projection of a stored field, rounded to the nearest integer
    Affine { field: Field, factor: f64, offset: f64 },
}

/// A named KPI: declarative accessor plus presentation hints
#[derive(Debug, Clone, Serialize)]
pub struct MetricDefinition {
    /// Stable identifier (e.g. "daily-revenue")
    pub id: String,
    pub label: String,
    pub description: String,
    pub unit: Unit,
    /// How the value is derived from a monthly record
    pub expr: MetricExpr,
    /// Optional target threshold, in the metric's unit
    pub target: Option<f64>,
    /// Optional display formatter; raw numeric rendering without one
    pub formatter: Option<Formatter>,
}

impl MetricDefinition {
    /// Render a value with this metric's formatter, or raw when none is set
    pub fn format_value(&self, value: f64) -> String {
        match self.formatter {
            Some(f) => f.format(value),
            None => value.to_string(),
        }
    }
}

/// A concrete step toward a key result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub text: String,
    pub done: bool,
}

impl Action {
    /// Marker the planning sheets append to completed actions
    const DONE_MARKER: &'static str = "✅";

    /// Ingest an action label, stripping the trailing done marker into a
    /// structured flag
    pub fn from_label(label: &str) -> Self {
        let trimmed = label.trim_end();
        match trimmed.strip_suffix(Self::DONE_MARKER) {
            Some(rest) => Action {
                text: rest.trim_end().to_string(),
                done: true,
            },
            None => Action {
                text: trimmed.to_string(),
                done: false,
            },
        }
    }
}

/// A measurable sub-goal of an objective
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyResult {
    /// Stable identifier (e.g. "kr-2-1")
    pub id: String,
    pub label: String,
    /// Current measured value
    pub current: f64,
    /// Value at which this key result counts as fully achieved
    pub target: f64,
    /// Unit string for display ("%", "€", "offers", ...)
    pub unit: String,
    /// Planned steps, in priority order
    pub actions: Vec<Action>,
}

/// A strategic objective (OKR) composed of key results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectiveDefinition {
    /// Stable identifier (e.g. "obj-1")
    pub id: String,
    pub emoji: String,
    pub title: String,
    pub description: String,
    pub key_results: Vec<KeyResult>,
}
