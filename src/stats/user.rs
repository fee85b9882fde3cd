use serde::Serialize;

use crate::city::join_names;
use crate::error::StatsError;
use crate::record::Dataset;
use crate::stats::utility::{mode, value_counts};

/// Rider breakdowns: user type, gender and birth year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserStats {
    pub user_types: Vec<(String, usize)>,
    pub gender: GenderStats,
    pub birth_year: BirthYearStats,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GenderStats {
    Counts(Vec<(String, usize)>),
    /// The column exists but no selected trip has a value.
    NoValues,
    /// None of the loaded cities has a Gender column.
    Missing { cities: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BirthYearStats {
    Summary {
        earliest: i32,
        most_recent: i32,
        most_common: i32,
    },
    /// The column exists but no selected trip has a value.
    NoValues,
    /// None of the loaded cities has a Birth Year column.
    Missing { cities: String },
}

impl UserStats {
    pub fn from_dataset(dataset: &Dataset) -> Result<Self, StatsError> {
        let user_types = value_counts(
            dataset
                .records()
                .iter()
                .map(|r| r.user_type.as_str())
                .filter(|t| !t.is_empty()),
        )
        .into_iter()
        .map(|(t, n)| (t.to_string(), n))
        .collect();

        Ok(UserStats {
            user_types,
            gender: GenderStats::from_dataset(dataset),
            birth_year: BirthYearStats::from_dataset(dataset)?,
        })
    }
}

impl GenderStats {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        if !dataset.has_gender() {
            return GenderStats::Missing {
                cities: join_names(dataset.cities()),
            };
        }

        let counts = value_counts(
            dataset
                .records()
                .iter()
                .filter_map(|r| r.gender.as_deref())
                .filter(|g| !g.is_empty()),
        );
        if counts.is_empty() {
            return GenderStats::NoValues;
        }
        GenderStats::Counts(counts.into_iter().map(|(g, n)| (g.to_string(), n)).collect())
    }
}

impl BirthYearStats {
    /// Fails with [`StatsError::EmptyResult`] when the column exists and the
    /// selection holds no trips at all.
    pub fn from_dataset(dataset: &Dataset) -> Result<Self, StatsError> {
        if !dataset.has_birth_year() {
            return Ok(BirthYearStats::Missing {
                cities: join_names(dataset.cities()),
            });
        }
        if dataset.is_empty() {
            return Err(StatsError::EmptyResult {
                query: "birth year stats",
            });
        }

        let years: Vec<i32> = dataset
            .records()
            .iter()
            .filter_map(|r| r.birth_year)
            .collect();

        let (Some(earliest), Some(most_recent), Some(most_common)) = (
            years.iter().copied().min(),
            years.iter().copied().max(),
            mode(years.iter().copied()),
        ) else {
            return Ok(BirthYearStats::NoValues);
        };

        Ok(BirthYearStats::Summary {
            earliest,
            most_recent,
            most_common,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city::City;
    use crate::record::{SourceSchema, TripRecord};
    use chrono::NaiveDate;

    #[test]
    fn test_user_type_counts_largest_first() {
        let dataset = Dataset::new(
            vec![schema(City::Chicago, true)],
            vec![
                trip("Customer", Some("Female"), Some(1990)),
                trip("Subscriber", Some("Male"), Some(1985)),
                trip("Subscriber", Some("Male"), Some(1990)),
                trip("", None, None),
            ],
        );

        let stats = UserStats::from_dataset(&dataset).unwrap();
        assert_eq!(
            stats.user_types,
            vec![("Subscriber".to_string(), 2), ("Customer".to_string(), 1)]
        );
        assert_eq!(
            stats.gender,
            GenderStats::Counts(vec![("Male".to_string(), 2), ("Female".to_string(), 1)])
        );
        assert_eq!(
            stats.birth_year,
            BirthYearStats::Summary {
                earliest: 1985,
                most_recent: 1990,
                most_common: 1990,
            }
        );
    }

    #[test]
    fn test_missing_columns_name_the_city() {
        let dataset = Dataset::new(
            vec![schema(City::Washington, false)],
            vec![trip("Subscriber", None, None)],
        );

        let stats = UserStats::from_dataset(&dataset).unwrap();
        assert_eq!(
            stats.gender,
            GenderStats::Missing {
                cities: "Washington".to_string()
            }
        );
        assert_eq!(
            stats.birth_year,
            BirthYearStats::Missing {
                cities: "Washington".to_string()
            }
        );
    }

    #[test]
    fn test_missing_columns_on_empty_selection_is_not_an_error() {
        let dataset = Dataset::new(vec![schema(City::Washington, false)], vec![]);
        let stats = UserStats::from_dataset(&dataset).unwrap();
        assert!(stats.user_types.is_empty());
        assert!(matches!(stats.gender, GenderStats::Missing { .. }));
    }

    #[test]
    fn test_birth_year_empty_selection() {
        let dataset = Dataset::new(vec![schema(City::Chicago, true)], vec![]);
        assert_eq!(
            UserStats::from_dataset(&dataset),
            Err(StatsError::EmptyResult {
                query: "birth year stats"
            })
        );
    }

    #[test]
    fn test_birth_year_mode_tie_breaks_ascending() {
        let dataset = Dataset::new(
            vec![schema(City::NewYorkCity, true)],
            vec![
                trip("Subscriber", None, Some(1999)),
                trip("Subscriber", None, Some(1970)),
            ],
        );
        assert_eq!(
            BirthYearStats::from_dataset(&dataset),
            Ok(BirthYearStats::Summary {
                earliest: 1970,
                most_recent: 1999,
                most_common: 1970,
            })
        );
    }

    #[test]
    fn test_selection_without_demographic_values_keeps_user_types() {
        // only trips from a city lacking the columns survived the filter
        let dataset = Dataset::new(
            vec![schema(City::Chicago, true), schema(City::Washington, false)],
            vec![trip("Subscriber", None, None)],
        );

        let stats = UserStats::from_dataset(&dataset).unwrap();
        assert_eq!(stats.user_types, vec![("Subscriber".to_string(), 1)]);
        assert_eq!(stats.gender, GenderStats::NoValues);
        assert_eq!(stats.birth_year, BirthYearStats::NoValues);
    }

    // Helper functions for tests
    fn schema(city: City, demographics: bool) -> SourceSchema {
        SourceSchema {
            city,
            has_gender: demographics,
            has_birth_year: demographics,
        }
    }

    fn trip(user_type: &str, gender: Option<&str>, birth_year: Option<i32>) -> TripRecord {
        let ts = NaiveDate::from_ymd_opt(2017, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        TripRecord::new(City::Chicago, ts, 60, "A", "B", user_type)
            .with_gender(gender.map(str::to_string))
            .with_birth_year(birth_year)
    }
}
