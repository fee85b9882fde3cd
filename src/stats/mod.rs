//! Read-only statistics over a dataset.
//!
//! Queries that need a mode, minimum or maximum fail with
//! [`StatsError::EmptyResult`] on an empty selection; duration totals are
//! defined as zero instead.

pub mod duration;
pub mod station;
pub mod time;
pub mod user;
pub mod utility;

pub use duration::{DurationStats, MeanBreakdown, TotalBreakdown};
pub use station::StationStats;
pub use time::TimeStats;
pub use user::{BirthYearStats, GenderStats, UserStats};

use serde::Serialize;

use crate::error::StatsError;
use crate::record::Dataset;

/// Every summary query over one dataset.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub trips: usize,
    pub time: TimeStats,
    pub station: StationStats,
    pub duration: DurationStats,
    pub user: UserStats,
}

impl Report {
    pub fn from_dataset(dataset: &Dataset) -> Result<Self, StatsError> {
        Ok(Report {
            trips: dataset.len(),
            time: TimeStats::from_dataset(dataset)?,
            station: StationStats::from_dataset(dataset)?,
            duration: DurationStats::from_dataset(dataset),
            user: UserStats::from_dataset(dataset)?,
        })
    }
}
