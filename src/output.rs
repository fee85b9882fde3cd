//! Text and JSON renderings of statistics and raw records.

use anyhow::Result;
use serde::Serialize;
use tracing::debug;

use crate::record::TripRecord;
use crate::stats::{
    BirthYearStats, DurationStats, GenderStats, Report, StationStats, TimeStats, UserStats,
};

pub const NO_DATA: &str = "No data for this selection.";

fn rule() -> String {
    "-".repeat(40)
}

pub fn render_time(stats: &TimeStats) -> String {
    [
        "\nMost frequent times of travel:\n".to_string(),
        format!("Most common month: {}", stats.most_common_month),
        format!("Most common day: {}", stats.most_common_weekday),
        format!("Most common start hour: {}", stats.most_common_start_hour),
        rule(),
    ]
    .join("\n")
}

pub fn render_station(stats: &StationStats) -> String {
    [
        "\nMost popular stations and trips:\n".to_string(),
        format!("Most common start station: {}", stats.most_common_start_station),
        format!("Most common end station: {}", stats.most_common_end_station),
        format!("Most common route: {}", stats.most_common_route),
        rule(),
    ]
    .join("\n")
}

pub fn render_duration(stats: &DurationStats) -> String {
    [
        "\nTrip Duration Statistics:\n".to_string(),
        format!("Total travel time: {}", stats.total()),
        format!("Average travel time: {}", stats.mean()),
        rule(),
    ]
    .join("\n")
}

pub fn render_user(stats: &UserStats) -> String {
    let mut lines = vec!["\nUser Statistics:\n".to_string()];
    lines.extend(count_lines(&stats.user_types));

    match &stats.gender {
        GenderStats::Counts(counts) => {
            lines.push("\nGender distribution:\n".to_string());
            lines.extend(count_lines(counts));
        }
        GenderStats::NoValues => {
            lines.push("\nNo gender data in this selection.".to_string());
        }
        GenderStats::Missing { cities } => {
            lines.push(format!("No gender data available for {cities}."));
        }
    }

    match &stats.birth_year {
        BirthYearStats::Summary {
            earliest,
            most_recent,
            most_common,
        } => {
            lines.push(format!("\nEarliest birth year: {earliest}"));
            lines.push(format!("Most recent birth year: {most_recent}"));
            lines.push(format!("Most common birth year: {most_common}"));
        }
        BirthYearStats::NoValues => {
            lines.push("No birth year data in this selection.".to_string());
        }
        BirthYearStats::Missing { cities } => {
            lines.push(format!("No birth year data available for {cities}."));
        }
    }

    lines.push(rule());
    lines.join("\n")
}

pub fn render_report(report: &Report) -> String {
    [
        format!("\nTrips in selection: {}", report.trips),
        render_time(&report.time),
        render_station(&report.station),
        render_duration(&report.duration),
        render_user(&report.user),
    ]
    .join("\n")
}

/// Renders each record as a block of `field: value` rows.
pub fn render_page(records: &[TripRecord]) -> String {
    records
        .iter()
        .map(|r| {
            record_fields(r)
                .into_iter()
                .map(|(name, value)| format!("{name}: {value}"))
                .collect::<Vec<_>>()
                .join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Field-name/value rows for one record, in source column order.
pub fn record_fields(record: &TripRecord) -> Vec<(&'static str, String)> {
    vec![
        ("City", record.city.to_string()),
        ("Start Time", record.start_time.format("%Y-%m-%d %H:%M:%S").to_string()),
        ("End Time", record.end_time.clone().unwrap_or_default()),
        ("Trip Duration", record.trip_duration.to_string()),
        ("Start Station", record.start_station.clone()),
        ("End Station", record.end_station.clone()),
        ("User Type", record.user_type.clone()),
        ("Gender", record.gender.clone().unwrap_or_default()),
        (
            "Birth Year",
            record.birth_year.map(|y| y.to_string()).unwrap_or_default(),
        ),
        ("Month", record.month().to_string()),
        ("Weekday", record.weekday_name().to_string()),
        ("Start Hour", record.start_hour().to_string()),
    ]
}

/// Serializes any statistics value as pretty-printed JSON.
pub fn to_json(stats: &impl Serialize) -> Result<String> {
    let json = serde_json::to_string_pretty(stats)?;
    debug!(bytes = json.len(), "Rendered JSON");
    Ok(json)
}

fn count_lines(counts: &[(String, usize)]) -> Vec<String> {
    let width = counts.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    counts
        .iter()
        .map(|(k, n)| format!("{k:<width$}    {n}"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city::City;
    use chrono::NaiveDate;

    #[test]
    fn test_render_time() {
        let text = render_time(&TimeStats {
            most_common_month: "June",
            most_common_weekday: "Monday",
            most_common_start_hour: 17,
        });
        assert!(text.contains("Most common month: June"));
        assert!(text.contains("Most common day: Monday"));
        assert!(text.contains("Most common start hour: 17"));
        assert!(text.ends_with(&"-".repeat(40)));
    }

    #[test]
    fn test_render_duration() {
        let text = render_duration(&DurationStats {
            trips: 2,
            total_seconds: 90_061,
            mean_seconds: 125.5,
        });
        assert!(text.contains("Total travel time: 1d 1h 1m 1s"));
        assert!(text.contains("Average travel time: 2m 5.5s"));
    }

    #[test]
    fn test_render_user_missing_columns() {
        let text = render_user(&UserStats {
            user_types: vec![("Subscriber".to_string(), 3), ("Customer".to_string(), 1)],
            gender: GenderStats::Missing {
                cities: "Washington".to_string(),
            },
            birth_year: BirthYearStats::Missing {
                cities: "Washington".to_string(),
            },
        });
        assert!(text.contains("Subscriber    3"));
        assert!(text.contains("Customer      1"));
        assert!(text.contains("No gender data available for Washington."));
        assert!(text.contains("No birth year data available for Washington."));
        assert!(!text.contains("Gender distribution"));
    }

    #[test]
    fn test_render_user_columns_without_values() {
        let text = render_user(&UserStats {
            user_types: vec![("Customer".to_string(), 1)],
            gender: GenderStats::NoValues,
            birth_year: BirthYearStats::NoValues,
        });
        assert!(text.contains("Customer      1"));
        assert!(text.contains("No gender data in this selection."));
        assert!(text.contains("No birth year data in this selection."));
        assert!(!text.contains("Gender distribution"));
    }

    #[test]
    fn test_render_page() {
        let ts = NaiveDate::from_ymd_opt(2017, 1, 2)
            .unwrap()
            .and_hms_opt(9, 7, 57)
            .unwrap();
        let record = TripRecord::new(City::Chicago, ts, 776, "Canal St", "State St", "Subscriber")
            .with_gender(Some("Male".to_string()));

        let text = render_page(&[record.clone(), record]);
        assert!(text.contains("Start Time: 2017-01-02 09:07:57"));
        assert!(text.contains("Gender: Male"));
        assert!(text.contains("Weekday: Monday"));
        assert_eq!(text.matches("City: Chicago").count(), 2);
    }

    #[test]
    fn test_render_page_empty() {
        assert_eq!(render_page(&[]), "");
    }

    #[test]
    fn test_to_json() {
        let json = to_json(&DurationStats {
            trips: 0,
            total_seconds: 0,
            mean_seconds: 0.0,
        })
        .unwrap();
        assert!(json.contains("\"total_seconds\": 0"));
    }
}
