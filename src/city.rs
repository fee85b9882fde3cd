//! The closed set of cities a trip log can be loaded for.

use std::fmt;
use std::str::FromStr;

use crate::error::UnknownCity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    /// Lower-case key used at the prompt and in the city table.
    pub fn key(self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYorkCity => "new york city",
            City::Washington => "washington",
        }
    }

    /// Title-cased name for display, e.g. "New York City".
    pub fn name(self) -> &'static str {
        match self {
            City::Chicago => "Chicago",
            City::NewYorkCity => "New York City",
            City::Washington => "Washington",
        }
    }

    /// File name of the city's trip log inside a data directory.
    pub fn default_file_name(self) -> &'static str {
        match self {
            City::Chicago => "chicago.csv",
            City::NewYorkCity => "new_york_city.csv",
            City::Washington => "washington.csv",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for City {
    type Err = UnknownCity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        City::ALL
            .into_iter()
            .find(|c| c.key() == key)
            .ok_or_else(|| UnknownCity(s.to_string()))
    }
}

/// Joins the display names of `cities` with ", ".
pub fn join_names(cities: impl IntoIterator<Item = City>) -> String {
    cities
        .into_iter()
        .map(City::name)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("Chicago".parse::<City>().unwrap(), City::Chicago);
        assert_eq!(" NEW YORK CITY ".parse::<City>().unwrap(), City::NewYorkCity);
    }

    #[test]
    fn test_parse_unknown_city() {
        assert_eq!(
            "boston".parse::<City>(),
            Err(UnknownCity("boston".to_string()))
        );
    }

    #[test]
    fn test_join_names() {
        assert_eq!(join_names([City::Washington]), "Washington");
        assert_eq!(
            join_names([City::Chicago, City::NewYorkCity]),
            "Chicago, New York City"
        );
    }
}
