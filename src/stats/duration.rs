use serde::Serialize;
use std::fmt;

use crate::record::Dataset;

const SECONDS_PER_DAY: i64 = 86_400;
const SECONDS_PER_HOUR: i64 = 3_600;
const SECONDS_PER_MINUTE: i64 = 60;

/// Total and mean trip duration. Defined for empty datasets (both zero).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationStats {
    pub trips: usize,
    pub total_seconds: i64,
    pub mean_seconds: f64,
}

impl DurationStats {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let trips = dataset.len();
        let total_seconds: i64 = dataset.records().iter().map(|r| r.trip_duration).sum();
        let mean_seconds = if trips == 0 {
            0.0
        } else {
            total_seconds as f64 / trips as f64
        };

        DurationStats {
            trips,
            total_seconds,
            mean_seconds,
        }
    }

    pub fn total(&self) -> TotalBreakdown {
        TotalBreakdown::from_seconds(self.total_seconds)
    }

    pub fn mean(&self) -> MeanBreakdown {
        MeanBreakdown::from_seconds(self.mean_seconds)
    }
}

/// Days, hours, minutes and seconds of a whole-second total, each taken by
/// floor division of what the previous unit leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TotalBreakdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl TotalBreakdown {
    pub fn from_seconds(total: i64) -> Self {
        TotalBreakdown {
            days: total.div_euclid(SECONDS_PER_DAY),
            hours: total.rem_euclid(SECONDS_PER_DAY).div_euclid(SECONDS_PER_HOUR),
            minutes: total.rem_euclid(SECONDS_PER_HOUR).div_euclid(SECONDS_PER_MINUTE),
            seconds: total.rem_euclid(SECONDS_PER_MINUTE),
        }
    }
}

impl fmt::Display for TotalBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}d {}h {}m {}s",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

/// Whole minutes and (possibly fractional) remaining seconds of a mean.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeanBreakdown {
    pub minutes: f64,
    pub seconds: f64,
}

impl MeanBreakdown {
    pub fn from_seconds(mean: f64) -> Self {
        let per_minute = SECONDS_PER_MINUTE as f64;
        MeanBreakdown {
            minutes: (mean / per_minute).floor(),
            seconds: mean.rem_euclid(per_minute),
        }
    }
}

impl fmt::Display for MeanBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}m {}s", self.minutes, self.seconds)
    }
}
