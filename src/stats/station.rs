use serde::Serialize;

use crate::error::StatsError;
use crate::record::Dataset;
use crate::stats::utility::mode;

/// Most popular stations and trips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationStats {
    pub most_common_start_station: String,
    pub most_common_end_station: String,
    pub most_common_route: String,
}

impl StationStats {
    pub fn from_dataset(dataset: &Dataset) -> Result<Self, StatsError> {
        let empty = || StatsError::EmptyResult {
            query: "station stats",
        };
        let records = dataset.records();

        let start = mode(records.iter().map(|r| r.start_station.as_str())).ok_or_else(empty)?;
        let end = mode(records.iter().map(|r| r.end_station.as_str())).ok_or_else(empty)?;
        let route = mode(records.iter().map(|r| r.route())).ok_or_else(empty)?;

        Ok(StationStats {
            most_common_start_station: start.to_string(),
            most_common_end_station: end.to_string(),
            most_common_route: route,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city::City;
    use crate::record::TripRecord;
    use chrono::NaiveDate;

    #[test]
    fn test_station_stats_empty() {
        assert!(matches!(
            StationStats::from_dataset(&Dataset::default()),
            Err(StatsError::EmptyResult { .. })
        ));
    }

    #[test]
    fn test_station_stats_modes_and_route() {
        let dataset = Dataset::new(
            vec![],
            vec![
                trip("Canal St", "State St"),
                trip("Canal St", "Lake St"),
                trip("Wabash Ave", "Lake St"),
                trip("Wabash Ave", "State St"),
                trip("Wabash Ave", "State St"),
            ],
        );

        let stats = StationStats::from_dataset(&dataset).unwrap();
        assert_eq!(stats.most_common_start_station, "Wabash Ave");
        assert_eq!(stats.most_common_end_station, "State St");
        assert_eq!(stats.most_common_route, "Wabash Ave - State St");
    }

    #[test]
    fn test_route_tie_breaks_alphabetically() {
        let dataset = Dataset::new(vec![], vec![trip("B", "A"), trip("A", "B")]);

        let stats = StationStats::from_dataset(&dataset).unwrap();
        assert_eq!(stats.most_common_start_station, "A");
        assert_eq!(stats.most_common_route, "A - B");
    }

    // Helper functions for tests
    fn trip(start: &str, end: &str) -> TripRecord {
        let ts = NaiveDate::from_ymd_opt(2017, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        TripRecord::new(City::Chicago, ts, 60, start, end, "Subscriber")
    }
}
