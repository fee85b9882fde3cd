//! Error types surfaced by the loader, the filter layer and the statistics queries.

use crate::city::City;

/// Failure while turning one or more city sources into a [`Dataset`](crate::record::Dataset).
///
/// Either variant aborts the whole load; no partial dataset is ever returned.
#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("Data for {city} is unavailable: {reason}")]
    DataSource { city: City, reason: String },
    #[error("{city}, row {row}: cannot parse start time '{value}'")]
    Parse {
        city: City,
        row: usize,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

impl LoadError {
    pub(crate) fn source_unavailable(city: City, reason: impl ToString) -> Self {
        LoadError::DataSource {
            city,
            reason: reason.to_string(),
        }
    }
}

/// A query that needs a mode, minimum or maximum ran over zero values.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum StatsError {
    #[error("No data for this selection ({query})")]
    EmptyResult { query: &'static str },
}

/// Invalid month/weekday selection.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum FilterError {
    #[error("At least one month must be selected")]
    EmptyMonths,
    #[error("At least one weekday must be selected")]
    EmptyWeekdays,
    #[error("Month {0} is outside January to June")]
    MonthOutOfDomain(u32),
    #[error("Unknown month: {0}")]
    UnknownMonth(String),
    #[error("Unknown weekday: {0}")]
    UnknownWeekday(String),
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("Unknown city: {0}")]
pub struct UnknownCity(pub String);
