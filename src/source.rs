//! Reading a city's trip log into raw rows.
//!
//! [`SourceReader`] is the seam between the loader and wherever rows live.
//! [`CsvSource`] implements it over the CSV files named in a [`CityTable`].

use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use tracing::debug;

use crate::city::City;
use crate::config::CityTable;
use crate::error::LoadError;
use crate::record::SourceSchema;

const GENDER_COLUMN: &str = "Gender";
const BIRTH_YEAR_COLUMN: &str = "Birth Year";

/// One row exactly as it appears in a source, before timestamps are parsed.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTrip {
    #[serde(rename = "Start Time")]
    pub start_time: String,
    #[serde(rename = "End Time", default)]
    pub end_time: Option<String>,
    #[serde(rename = "Trip Duration")]
    pub trip_duration: f64,
    #[serde(rename = "Start Station")]
    pub start_station: String,
    #[serde(rename = "End Station")]
    pub end_station: String,
    #[serde(rename = "User Type")]
    pub user_type: String,
    #[serde(rename = "Gender", default)]
    pub gender: Option<String>,
    #[serde(rename = "Birth Year", default)]
    pub birth_year: Option<f64>,
}

/// All rows of one city, in file order, with the columns the city provides.
#[derive(Debug, Clone)]
pub struct SourceTable {
    pub schema: SourceSchema,
    pub rows: Vec<RawTrip>,
}

/// Produces the raw rows for a city.
pub trait SourceReader {
    fn read(&self, city: City) -> Result<SourceTable, LoadError>;
}

/// Reads CSV trip logs from the files listed in a [`CityTable`].
pub struct CsvSource {
    table: CityTable,
}

impl CsvSource {
    pub fn new(table: CityTable) -> Self {
        Self { table }
    }
}

impl SourceReader for CsvSource {
    #[tracing::instrument(skip(self), fields(city = %city))]
    fn read(&self, city: City) -> Result<SourceTable, LoadError> {
        let path = self
            .table
            .path(city)
            .ok_or_else(|| LoadError::source_unavailable(city, "no source file configured"))?;

        debug!(path = %path.display(), "Opening trip log");
        let file = File::open(path).map_err(|e| {
            LoadError::source_unavailable(city, format!("{}: {}", path.display(), e))
        })?;

        read_table(city, file)
    }
}

/// Parses CSV text from `reader` into a [`SourceTable`] for `city`.
///
/// Columns other than the known trip columns are ignored. A missing required
/// column or a malformed row makes the whole source unavailable.
pub fn read_table<R: Read>(city: City, reader: R) -> Result<SourceTable, LoadError> {
    let mut rdr = csv::Reader::from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| LoadError::source_unavailable(city, e))?;
    let schema = SourceSchema {
        city,
        has_gender: headers.iter().any(|h| h == GENDER_COLUMN),
        has_birth_year: headers.iter().any(|h| h == BIRTH_YEAR_COLUMN),
    };

    let mut rows = Vec::new();
    for result in rdr.deserialize() {
        let row: RawTrip = result.map_err(|e| LoadError::source_unavailable(city, e))?;
        rows.push(row);
    }

    debug!(
        rows = rows.len(),
        has_gender = schema.has_gender,
        has_birth_year = schema.has_birth_year,
        "Trip log read"
    );

    Ok(SourceTable { schema, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    const WITH_DEMOGRAPHICS: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year
0,2017-01-01 00:07:57,2017-01-01 00:20:53,776,Columbus Cir,Broadway & W 60 St,Subscriber,Male,1992.0
1,2017-01-01 00:25:00,2017-01-01 00:30:00,300,Broadway & W 60 St,Columbus Cir,Customer,,
";

    const WITHOUT_DEMOGRAPHICS: &str = "\
Start Time,End Time,Trip Duration,Start Station,End Station,User Type
2017-06-21 08:36:34,2017-06-21 08:44:43,489.066,14th & Belmont St NW,15th & K St NW,Subscriber
";

    #[test]
    fn test_read_table_with_optional_columns() {
        let table = read_table(City::NewYorkCity, WITH_DEMOGRAPHICS.as_bytes()).unwrap();

        assert!(table.schema.has_gender);
        assert!(table.schema.has_birth_year);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].gender.as_deref(), Some("Male"));
        assert_eq!(table.rows[0].birth_year, Some(1992.0));
        assert_eq!(table.rows[1].gender, None);
        assert_eq!(table.rows[1].birth_year, None);
    }

    #[test]
    fn test_read_table_without_optional_columns() {
        let table = read_table(City::Washington, WITHOUT_DEMOGRAPHICS.as_bytes()).unwrap();

        assert!(!table.schema.has_gender);
        assert!(!table.schema.has_birth_year);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].trip_duration, 489.066);
        assert_eq!(table.rows[0].gender, None);
    }

    #[test]
    fn test_read_table_missing_required_column() {
        let csv = "Start Time,Trip Duration\n2017-01-01 00:00:00,10\n";
        let result = read_table(City::Chicago, csv.as_bytes());
        assert!(matches!(result, Err(LoadError::DataSource { city: City::Chicago, .. })));
    }

    #[test]
    fn test_unconfigured_city_is_unavailable() {
        let source = CsvSource::new(CityTable::default());
        let result = source.read(City::Chicago);
        assert!(matches!(result, Err(LoadError::DataSource { .. })));
    }

    #[test]
    fn test_missing_file_is_unavailable() {
        let table = CityTable::default().with_entry(City::Chicago, "/nonexistent/chicago.csv");
        let result = CsvSource::new(table).read(City::Chicago);
        assert!(matches!(result, Err(LoadError::DataSource { .. })));
    }
}
