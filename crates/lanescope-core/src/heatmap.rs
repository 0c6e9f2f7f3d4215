//! Occupancy heatmap simulator
//!
//! Produces the day×hour lane-utilization grid shown on the overview page.
//! The grid is **simulated** decorative texture, not measured data: it is
//! generated from a fixed weekday/weekend profile plus bounded noise and is
//! deliberately independent of the record store. Consumers must label it as
//! simulated.

use rand::Rng;
use serde::Serialize;

/// Rows of the grid, Monday through Sunday
pub const DAYS_PER_WEEK: usize = 7;

/// Columns of the grid: opening hours, 10:00 through 23:00
pub const OPEN_HOURS: usize = 14;

/// First opening hour of the day
const FIRST_HOUR: u8 = 10;

/// Day-of-week row labels
pub const DAY_LABELS: [&str; DAYS_PER_WEEK] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Simulated utilization grid; every cell is a percentage in 0..=100
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OccupancyGrid {
    cells: [[u8; OPEN_HOURS]; DAYS_PER_WEEK],
}

impl OccupancyGrid {
    /// Day-major cell matrix
    pub fn cells(&self) -> &[[u8; OPEN_HOURS]; DAYS_PER_WEEK] {
        &self.cells
    }

    /// Column label for an hour index ("10:00" .. "23:00")
    pub fn hour_label(hour_index: usize) -> String {
        format!("{}:00", FIRST_HOUR as usize + hour_index)
    }

    /// Whether a row index falls on the weekend
    pub fn is_weekend(day_index: usize) -> bool {
        day_index >= 5
    }
}

/// Generate a grid from the thread-local random source
pub fn generate() -> OccupancyGrid {
    generate_with(&mut rand::thread_rng())
}

/// Generate a grid from a caller-supplied random source
///
/// Weekends start from a higher base than weekdays, evenings and mid
/// afternoons get a peak bonus, lunch gets a small bump, and a bounded
/// noise term keeps the texture alive. Cells are capped at 100.
pub fn generate_with<R: Rng>(rng: &mut R) -> OccupancyGrid {
    let mut cells = [[0u8; OPEN_HOURS]; DAYS_PER_WEEK];
    for (day, row) in cells.iter_mut().enumerate() {
        let base: u32 = if OccupancyGrid::is_weekend(day) { 60 } else { 30 };
        for (hour_index, cell) in row.iter_mut().enumerate() {
            let hour = FIRST_HOUR + hour_index as u8;
            let peak: u32 = match hour {
                18..=21 => 30,
                14..=16 => 15,
                _ => 0,
            };
            let lunch: u32 = if (12..=13).contains(&hour) { 10 } else { 0 };
            let noise: u32 = rng.gen_range(0..15);
            *cell = (base + peak + lunch + noise).min(100) as u8;
        }
    }
    OccupancyGrid { cells }
}
