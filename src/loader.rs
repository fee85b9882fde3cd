//! Builds a filtered [`Dataset`] from one or more city sources.

use chrono::NaiveDateTime;
use std::time::Instant;
use tracing::{debug, info};

use crate::city::City;
use crate::error::LoadError;
use crate::filter::{FilterSpec, filter};
use crate::record::{Dataset, TripRecord};
use crate::source::{RawTrip, SourceReader};

/// Loads and merges city trip logs through a [`SourceReader`].
pub struct DatasetLoader<S> {
    source: S,
}

impl<S: SourceReader> DatasetLoader<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Reads every requested city, concatenates their rows in the order the
    /// cities were given, derives the calendar fields and applies `spec`.
    ///
    /// Repeated cities are read once. Any unreadable source or unparseable
    /// start time fails the whole load.
    #[tracing::instrument(skip(self, spec))]
    pub fn load(&self, cities: &[City], spec: &FilterSpec) -> Result<Dataset, LoadError> {
        let started = Instant::now();

        let mut seen = Vec::with_capacity(cities.len());
        let mut merged = Dataset::default();

        for &city in cities {
            if seen.contains(&city) {
                continue;
            }
            seen.push(city);

            let table = self.source.read(city)?;
            let records = table
                .rows
                .into_iter()
                .enumerate()
                .map(|(i, row)| to_record(city, i + 1, row))
                .collect::<Result<Vec<_>, _>>()?;

            debug!(city = %city, rows = records.len(), "City merged");
            merged = merged.concat(Dataset::new(vec![table.schema], records));
        }

        let dataset = filter(&merged, spec);

        info!(
            total_rows = merged.len(),
            kept_rows = dataset.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Dataset loaded"
        );
        Ok(dataset)
    }
}

/// Parses a source start-time value, with or without fractional seconds.
pub fn parse_start_time(value: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f"))
}

fn to_record(city: City, row: usize, raw: RawTrip) -> Result<TripRecord, LoadError> {
    let start_time = parse_start_time(&raw.start_time).map_err(|source| LoadError::Parse {
        city,
        row,
        value: raw.start_time.clone(),
        source,
    })?;

    // Durations and birth years are sometimes exported as decimals.
    let record = TripRecord::new(
        city,
        start_time,
        raw.trip_duration.trunc() as i64,
        &raw.start_station,
        &raw.end_station,
        &raw.user_type,
    )
    .with_end_time(raw.end_time)
    .with_gender(raw.gender)
    .with_birth_year(raw.birth_year.map(|y| y.trunc() as i32));

    Ok(record)
}
