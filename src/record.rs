//! Trip records, per-city schema flags and the immutable dataset.

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};

use crate::calendar::weekday_name;
use crate::city::City;

/// One bike-share trip with its derived calendar fields.
///
/// `month`, `weekday` and `start_hour` are computed from `start_time` when the
/// record is built and never change afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    pub city: City,
    pub start_time: NaiveDateTime,
    pub end_time: Option<String>,
    pub trip_duration: i64,
    pub start_station: String,
    pub end_station: String,
    pub user_type: String,
    pub gender: Option<String>,
    pub birth_year: Option<i32>,

    // derived
    month: u32,
    weekday: Weekday,
    start_hour: u32,
}

impl TripRecord {
    pub fn new(
        city: City,
        start_time: NaiveDateTime,
        trip_duration: i64,
        start_station: &str,
        end_station: &str,
        user_type: &str,
    ) -> Self {
        TripRecord {
            city,
            start_time,
            end_time: None,
            trip_duration,
            start_station: start_station.to_string(),
            end_station: end_station.to_string(),
            user_type: user_type.to_string(),
            gender: None,
            birth_year: None,
            month: start_time.month(),
            weekday: start_time.weekday(),
            start_hour: start_time.hour(),
        }
    }

    pub fn with_end_time(mut self, end_time: Option<String>) -> Self {
        self.end_time = end_time;
        self
    }

    pub fn with_gender(mut self, gender: Option<String>) -> Self {
        self.gender = gender;
        self
    }

    pub fn with_birth_year(mut self, birth_year: Option<i32>) -> Self {
        self.birth_year = birth_year;
        self
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn weekday(&self) -> Weekday {
        self.weekday
    }

    pub fn weekday_name(&self) -> &'static str {
        weekday_name(self.weekday)
    }

    pub fn start_hour(&self) -> u32 {
        self.start_hour
    }

    /// "<start station> - <end station>"
    pub fn route(&self) -> String {
        format!("{} - {}", self.start_station, self.end_station)
    }
}

/// Which optional columns a city's source carries.
///
/// Resolved once from the source header; presence is a property of the city,
/// never of an individual row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceSchema {
    pub city: City,
    pub has_gender: bool,
    pub has_birth_year: bool,
}

/// An ordered, immutable sequence of trips plus the schemas of the cities they came from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    sources: Vec<SourceSchema>,
    records: Vec<TripRecord>,
}

impl Dataset {
    pub fn new(sources: Vec<SourceSchema>, records: Vec<TripRecord>) -> Self {
        Self { sources, records }
    }

    /// A dataset over the same sources holding a different set of rows.
    pub(crate) fn with_records(&self, records: Vec<TripRecord>) -> Self {
        Self {
            sources: self.sources.clone(),
            records,
        }
    }

    pub fn records(&self) -> &[TripRecord] {
        &self.records
    }

    pub fn sources(&self) -> &[SourceSchema] {
        &self.sources
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn cities(&self) -> impl Iterator<Item = City> + '_ {
        self.sources.iter().map(|s| s.city)
    }

    /// True if at least one source city has a Gender column.
    pub fn has_gender(&self) -> bool {
        self.sources.iter().any(|s| s.has_gender)
    }

    /// True if at least one source city has a Birth Year column.
    pub fn has_birth_year(&self) -> bool {
        self.sources.iter().any(|s| s.has_birth_year)
    }

    /// Appends `other` after `self`, keeping row order within each.
    pub fn concat(mut self, other: Dataset) -> Dataset {
        self.sources.extend(other.sources);
        self.records.extend(other.records);
        self
    }
}
