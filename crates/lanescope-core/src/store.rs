//! Record store: per-site monthly time series
//!
//! Series are read-only reference data built once at process start, either
//! from the built-in demonstration dataset or from a JSON document. Every
//! series upholds the invariant the derivation engine relies on: exactly one
//! record per month, in calendar order, no gaps.

use std::io;

use crate::error::{Error, Result};
use crate::models::{Month, MonthlyRecord, Site, SiteSummary};

/// Ordered, id-addressable collection of sites
#[derive(Debug, Clone)]
pub struct SiteDirectory {
    sites: Vec<Site>,
}

impl SiteDirectory {
    /// Build a directory, validating the series invariant for every site
    pub fn new(sites: Vec<Site>) -> Result<Self> {
        let mut seen = Vec::with_capacity(sites.len());
        for site in &sites {
            if seen.contains(&&site.id) {
                return Err(Error::InvalidSeries(format!(
                    "duplicate site id: {}",
                    site.id
                )));
            }
            seen.push(&site.id);
            validate_series(site)?;
        }
        Ok(Self { sites })
    }

    /// The built-in demonstration dataset: three sites with a full year of
    /// records each
    pub fn seeded() -> Self {
        Self {
            sites: seeded_sites(),
        }
    }

    /// Load sites from a JSON document (an array of sites with their records)
    pub fn from_json_reader(reader: impl io::Read) -> Result<Self> {
        let sites: Vec<Site> = serde_json::from_reader(reader)?;
        let directory = Self::new(sites)?;
        tracing::debug!(sites = directory.sites.len(), "Loaded site data");
        Ok(directory)
    }

    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    /// Site identities for pickers, without the series payload
    pub fn summaries(&self) -> Vec<SiteSummary> {
        self.sites
            .iter()
            .map(|s| SiteSummary {
                id: s.id.clone(),
                label: s.label.clone(),
                city: s.city.clone(),
            })
            .collect()
    }

    /// Look up a site by id
    pub fn site(&self, id: &str) -> Result<&Site> {
        self.sites
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| Error::UnknownSite(id.to_string()))
    }

    /// A site's monthly series, in calendar order
    pub fn series(&self, id: &str) -> Result<&[MonthlyRecord]> {
        Ok(&self.site(id)?.records)
    }
}

/// The most recent record of a series
pub fn latest(series: &[MonthlyRecord]) -> Option<&MonthlyRecord> {
    series.last()
}

/// The record immediately before the most recent one, if the series has at
/// least two records
pub fn previous(series: &[MonthlyRecord]) -> Option<&MonthlyRecord> {
    if series.len() < 2 {
        return None;
    }
    series.get(series.len() - 2)
}

fn validate_series(site: &Site) -> Result<()> {
    if site.records.len() != Month::ALL.len() {
        return Err(Error::InvalidSeries(format!(
            "site {}: expected {} monthly records, got {}",
            site.id,
            Month::ALL.len(),
            site.records.len()
        )));
    }
    for (i, record) in site.records.iter().enumerate() {
        if record.month != Month::ALL[i] {
            return Err(Error::InvalidSeries(format!(
                "site {}: record {} is {}, expected {}",
                site.id,
                i,
                record.month,
                Month::ALL[i]
            )));
        }
    }
    Ok(())
}

fn rec(
    month: Month,
    lanes: f64,
    bar: f64,
    arcade: f64,
    billiards: f64,
    occupancy: f64,
    basket: f64,
    clubs: f64,
) -> MonthlyRecord {
    MonthlyRecord {
        month,
        lane_revenue: lanes,
        bar_revenue: bar,
        arcade_revenue: arcade,
        billiards_revenue: billiards,
        occupancy_rate: occupancy,
        avg_basket: basket,
        club_revenue_share: clubs,
    }
}

fn seeded_sites() -> Vec<Site> {
    use Month::*;

    // Columns: month, lanes, bar, arcade, billiards, occupancy, basket, clubs
    let lyon = vec![
        rec(January, 3200.0, 1800.0, 650.0, 400.0, 58.0, 24.0, 22.0),
        rec(February, 3400.0, 1900.0, 700.0, 420.0, 62.0, 25.0, 23.0),
        rec(March, 3600.0, 2100.0, 750.0, 450.0, 65.0, 26.0, 24.0),
        rec(April, 3800.0, 2200.0, 800.0, 480.0, 68.0, 27.0, 25.0),
        rec(May, 4000.0, 2400.0, 850.0, 500.0, 72.0, 28.0, 26.0),
        rec(June, 4200.0, 2600.0, 900.0, 520.0, 75.0, 29.0, 27.0),
        rec(July, 4500.0, 2800.0, 1000.0, 600.0, 80.0, 22.0, 20.0),
        rec(August, 4400.0, 2700.0, 950.0, 580.0, 78.0, 21.0, 19.0),
        rec(September, 3900.0, 2300.0, 820.0, 490.0, 70.0, 30.0, 28.0),
        rec(October, 4100.0, 2500.0, 880.0, 510.0, 74.0, 31.0, 29.0),
        rec(November, 3700.0, 2200.0, 780.0, 460.0, 67.0, 32.0, 30.0),
        rec(December, 4800.0, 3000.0, 1100.0, 650.0, 85.0, 34.0, 32.0),
    ];

    let villeurbanne = vec![
        rec(January, 2600.0, 1400.0, 500.0, 300.0, 52.0, 21.0, 18.0),
        rec(February, 2700.0, 1500.0, 540.0, 320.0, 55.0, 22.0, 19.0),
        rec(March, 2900.0, 1600.0, 580.0, 340.0, 58.0, 23.0, 20.0),
        rec(April, 3000.0, 1700.0, 620.0, 360.0, 60.0, 24.0, 21.0),
        rec(May, 3200.0, 1800.0, 660.0, 380.0, 63.0, 25.0, 22.0),
        rec(June, 3300.0, 1900.0, 700.0, 400.0, 66.0, 26.0, 23.0),
        rec(July, 3600.0, 2100.0, 780.0, 460.0, 71.0, 20.0, 17.0),
        rec(August, 3500.0, 2000.0, 740.0, 440.0, 69.0, 19.0, 16.0),
        rec(September, 3100.0, 1750.0, 640.0, 370.0, 61.0, 27.0, 24.0),
        rec(October, 3250.0, 1850.0, 690.0, 390.0, 64.0, 28.0, 25.0),
        rec(November, 2950.0, 1650.0, 600.0, 350.0, 59.0, 28.0, 26.0),
        rec(December, 3800.0, 2300.0, 850.0, 500.0, 76.0, 30.0, 28.0),
    ];

    let grenoble = vec![
        rec(January, 3600.0, 2000.0, 720.0, 450.0, 61.0, 25.0, 24.0),
        rec(February, 3750.0, 2100.0, 760.0, 470.0, 64.0, 26.0, 25.0),
        rec(March, 3950.0, 2250.0, 810.0, 500.0, 67.0, 27.0, 26.0),
        rec(April, 4150.0, 2400.0, 860.0, 520.0, 70.0, 28.0, 27.0),
        rec(May, 4350.0, 2550.0, 910.0, 550.0, 74.0, 29.0, 28.0),
        rec(June, 4550.0, 2700.0, 960.0, 570.0, 77.0, 30.0, 29.0),
        rec(July, 4900.0, 2950.0, 1080.0, 650.0, 82.0, 23.0, 21.0),
        rec(August, 4800.0, 2850.0, 1030.0, 630.0, 80.0, 22.0, 20.0),
        rec(September, 4250.0, 2450.0, 880.0, 530.0, 72.0, 31.0, 30.0),
        rec(October, 4450.0, 2600.0, 940.0, 560.0, 76.0, 32.0, 31.0),
        rec(November, 4050.0, 2350.0, 840.0, 510.0, 69.0, 33.0, 32.0),
        rec(December, 5200.0, 3200.0, 1180.0, 700.0, 88.0, 35.0, 34.0),
    ];

    vec![
        Site {
            id: "lyon".to_string(),
            label: "LaneScope Lyon".to_string(),
            city: "Lyon".to_string(),
            records: lyon,
        },
        Site {
            id: "villeurbanne".to_string(),
            label: "LaneScope Villeurbanne".to_string(),
            city: "Villeurbanne".to_string(),
            records: villeurbanne,
        },
        Site {
            id: "grenoble".to_string(),
            label: "LaneScope Grenoble".to_string(),
            city: "Grenoble".to_string(),
            records: grenoble,
        },
    ]
}
