//! CLI entry point for the bikeshare explorer.
//!
//! Runs the interactive explore session by default, or prints statistics and
//! raw pages for a selection given on the command line.

use anyhow::Result;
use bikeshare_explorer::{
    calendar::{MONTHS, WEEKDAYS, parse_month, parse_weekday},
    city::City,
    config::CityTable,
    error::StatsError,
    filter::FilterSpec,
    loader::DatasetLoader,
    output::{
        NO_DATA, render_duration, render_page, render_report, render_station, render_time,
        render_user, to_json,
    },
    pager::RawDataPager,
    prompt::ConsolePrompter,
    record::Dataset,
    session::Session,
    source::CsvSource,
    stats::{DurationStats, Report, StationStats, TimeStats, UserStats},
};
use clap::{Parser, Subcommand, ValueEnum};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "bikeshare_explorer")]
#[command(about = "Explore US bike-share trip data", long_about = None)]
struct Cli {
    /// Directory holding chicago.csv, new_york_city.csv and washington.csv
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// JSON file mapping city keys to trip-log files
    #[arg(long, global = true, value_name = "FILE")]
    city_table: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Pick filters and run queries interactively (default)
    Explore,
    /// Print statistics for a selection
    Stats {
        #[command(flatten)]
        selection: Selection,

        /// Which statistics to print
        #[arg(short, long, value_enum, default_value_t = ReportKind::All)]
        report: ReportKind,

        /// Print JSON instead of text
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print one page of raw trips for a selection
    Raw {
        #[command(flatten)]
        selection: Selection,

        /// 1-based page number (5 trips per page)
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
        page: u64,
    },
}

#[derive(clap::Args)]
struct Selection {
    /// City keys, comma-separated or repeated (e.g. "chicago,new york city")
    #[arg(short, long = "city", value_delimiter = ',', required = true)]
    cities: Vec<City>,

    /// Month names, January to June (default: all)
    #[arg(short, long = "month", value_delimiter = ',')]
    months: Vec<String>,

    /// Weekday names (default: all)
    #[arg(short, long = "day", value_delimiter = ',')]
    days: Vec<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum ReportKind {
    Time,
    Station,
    Duration,
    User,
    All,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/bikeshare_explorer.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bikeshare_explorer.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("warn".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let table = city_table(cli.data_dir, cli.city_table)?;
    for (city, path) in table.iter() {
        info!(city = %city, path = %path.display(), "City source");
    }
    let loader = DatasetLoader::new(CsvSource::new(table));

    match cli.command.unwrap_or(Commands::Explore) {
        Commands::Explore => {
            let stdin = std::io::stdin();
            let console = ConsolePrompter::new(stdin.lock(), std::io::stdout());
            Session::new(loader, console).run()?;
        }
        Commands::Stats {
            selection,
            report,
            json,
        } => {
            let dataset = load_selection(&loader, &selection)?;
            match print_stats(&dataset, report, json) {
                Ok(()) => {}
                Err(e) if e.downcast_ref::<StatsError>().is_some() => {
                    warn!(error = %e, "Query returned no data");
                    println!("{NO_DATA}");
                }
                Err(e) => return Err(e),
            }
        }
        Commands::Raw { selection, page } => {
            let dataset = load_selection(&loader, &selection)?;
            let mut pager = RawDataPager::new(&dataset);
            pager.skip_pages(usize::try_from(page - 1).unwrap_or(usize::MAX));
            let records = pager.next_page();
            if records.is_empty() {
                println!("No more raw data.");
            } else {
                println!("{}", render_page(records));
            }
        }
    }

    Ok(())
}

/// Resolves the city table: `--city-table`, then `BIKESHARE_CITY_TABLE`,
/// then the default file names under `--data-dir` / `BIKESHARE_DATA_DIR` / `.`.
fn city_table(data_dir: Option<PathBuf>, table_path: Option<PathBuf>) -> Result<CityTable> {
    let table_path =
        table_path.or_else(|| std::env::var("BIKESHARE_CITY_TABLE").ok().map(PathBuf::from));
    if let Some(path) = table_path {
        return CityTable::load(path);
    }

    let data_dir = data_dir
        .or_else(|| std::env::var("BIKESHARE_DATA_DIR").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."));
    Ok(CityTable::with_data_dir(data_dir))
}

fn load_selection(loader: &DatasetLoader<CsvSource>, selection: &Selection) -> Result<Dataset> {
    let months = if selection.months.is_empty() {
        MONTHS.to_vec()
    } else {
        selection
            .months
            .iter()
            .map(|m| parse_month(m))
            .collect::<Result<Vec<_>, _>>()?
    };
    let weekdays = if selection.days.is_empty() {
        WEEKDAYS.to_vec()
    } else {
        selection
            .days
            .iter()
            .map(|d| parse_weekday(d))
            .collect::<Result<Vec<_>, _>>()?
    };

    let spec = FilterSpec::new(months, weekdays)?;
    Ok(loader.load(&selection.cities, &spec)?)
}

fn print_stats(dataset: &Dataset, report: ReportKind, json: bool) -> Result<()> {
    let text = match (report, json) {
        (ReportKind::Time, false) => render_time(&TimeStats::from_dataset(dataset)?),
        (ReportKind::Time, true) => to_json(&TimeStats::from_dataset(dataset)?)?,
        (ReportKind::Station, false) => render_station(&StationStats::from_dataset(dataset)?),
        (ReportKind::Station, true) => to_json(&StationStats::from_dataset(dataset)?)?,
        (ReportKind::Duration, false) => render_duration(&DurationStats::from_dataset(dataset)),
        (ReportKind::Duration, true) => to_json(&DurationStats::from_dataset(dataset))?,
        (ReportKind::User, false) => render_user(&UserStats::from_dataset(dataset)?),
        (ReportKind::User, true) => to_json(&UserStats::from_dataset(dataset)?)?,
        (ReportKind::All, false) => render_report(&Report::from_dataset(dataset)?),
        (ReportKind::All, true) => to_json(&Report::from_dataset(dataset)?)?,
    };
    println!("{text}");
    Ok(())
}
