use chrono::Weekday;
use std::collections::{BTreeSet, HashSet};
use tracing::debug;

use crate::calendar::{MONTHS, WEEKDAYS, month_name, parse_month, parse_weekday, weekday_name};
use crate::error::FilterError;
use crate::record::{Dataset, TripRecord};

/// Accepted months and weekdays.
///
/// Both sets are non-empty and drawn from their domains (January to June,
/// the seven weekdays). A record passes when its month is any accepted month
/// and its weekday is any accepted weekday.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSpec {
    months: BTreeSet<u32>,
    weekdays: HashSet<Weekday>,
}

impl FilterSpec {
    pub fn new(
        months: impl IntoIterator<Item = u32>,
        weekdays: impl IntoIterator<Item = Weekday>,
    ) -> Result<Self, FilterError> {
        let months: BTreeSet<u32> = months.into_iter().collect();
        let weekdays: HashSet<Weekday> = weekdays.into_iter().collect();

        if months.is_empty() {
            return Err(FilterError::EmptyMonths);
        }
        if weekdays.is_empty() {
            return Err(FilterError::EmptyWeekdays);
        }
        if let Some(&m) = months.iter().find(|m| !MONTHS.contains(m)) {
            return Err(FilterError::MonthOutOfDomain(m));
        }

        Ok(Self { months, weekdays })
    }

    /// Builds a spec from month and weekday names, ignoring case.
    pub fn parse<M, D>(months: &[M], weekdays: &[D]) -> Result<Self, FilterError>
    where
        M: AsRef<str>,
        D: AsRef<str>,
    {
        let months = months
            .iter()
            .map(|m| parse_month(m.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        let weekdays = weekdays
            .iter()
            .map(|d| parse_weekday(d.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(months, weekdays)
    }

    /// Every month of the domain and every weekday.
    pub fn all() -> Self {
        Self {
            months: MONTHS.into_iter().collect(),
            weekdays: WEEKDAYS.into_iter().collect(),
        }
    }

    pub fn accepts(&self, record: &TripRecord) -> bool {
        self.months.contains(&record.month()) && self.weekdays.contains(&record.weekday())
    }

    /// Accepted months in ascending order.
    pub fn months(&self) -> impl Iterator<Item = u32> + '_ {
        self.months.iter().copied()
    }

    /// Accepted weekdays in prompt order (Sunday first).
    pub fn weekdays(&self) -> impl Iterator<Item = Weekday> + '_ {
        WEEKDAYS.into_iter().filter(|d| self.weekdays.contains(d))
    }

    pub fn month_names(&self) -> Vec<&'static str> {
        self.months().filter_map(month_name).collect()
    }

    pub fn weekday_names(&self) -> Vec<&'static str> {
        self.weekdays().map(weekday_name).collect()
    }
}

/// Returns the records of `dataset` accepted by `spec`, in their original order.
///
/// The input is left untouched; the result keeps the input's source schemas.
pub fn filter(dataset: &Dataset, spec: &FilterSpec) -> Dataset {
    let kept: Vec<TripRecord> = dataset
        .records()
        .iter()
        .filter(|r| spec.accepts(r))
        .cloned()
        .collect();

    debug!(before = dataset.len(), after = kept.len(), "Filter applied");
    dataset.with_records(kept)
}
