//! Error types for Lanescope

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown site: {0}")]
    UnknownSite(String),

    #[error("Unknown metric: {0}")]
    UnknownMetric(String),

    #[error("Unknown objective: {0}")]
    UnknownObjective(String),

    /// A derivation was requested on a series that is too short for it.
    #[error("Insufficient data: need at least {needed} records, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Percentage trend against a zero baseline is undefined.
    #[error("Trend baseline is zero")]
    ZeroBaseline,

    #[error("Invalid series: {0}")]
    InvalidSeries(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
