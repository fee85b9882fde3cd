use serde::Serialize;

use crate::calendar::month_name;
use crate::error::StatsError;
use crate::record::Dataset;
use crate::stats::utility::mode;

/// Most frequent times of travel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeStats {
    pub most_common_month: &'static str,
    pub most_common_weekday: &'static str,
    pub most_common_start_hour: u32,
}

impl TimeStats {
    pub fn from_dataset(dataset: &Dataset) -> Result<Self, StatsError> {
        let empty = || StatsError::EmptyResult { query: "time stats" };
        let records = dataset.records();

        let month = mode(records.iter().map(|r| r.month())).ok_or_else(empty)?;
        let weekday = mode(records.iter().map(|r| r.weekday_name())).ok_or_else(empty)?;
        let hour = mode(records.iter().map(|r| r.start_hour())).ok_or_else(empty)?;

        Ok(TimeStats {
            most_common_month: month_name(month).ok_or_else(empty)?,
            most_common_weekday: weekday,
            most_common_start_hour: hour,
        })
    }
}
