//! The interactive explore loop: pick filters, load, run queries, restart.

use anyhow::Result;
use std::time::Instant;
use tracing::{info, warn};

use crate::calendar::{MONTHS, WEEKDAYS, month_name, weekday_name};
use crate::city::{City, join_names};
use crate::error::StatsError;
use crate::filter::FilterSpec;
use crate::loader::DatasetLoader;
use crate::output::{
    NO_DATA, render_duration, render_page, render_station, render_time, render_user,
};
use crate::pager::RawDataPager;
use crate::prompt::{Prompter, Reply, Screen};
use crate::record::Dataset;
use crate::source::SourceReader;
use crate::stats::{DurationStats, StationStats, TimeStats, UserStats};

const MENU: &str = "\nChoose an option:\n [1] Time Stats\n [2] Station Stats\n [3] Trip Duration Stats\n [4] User Stats\n [5] Show Raw Data\n [6] Restart\n>";
const MENU_OPTIONS: &[&str] = &["1", "2", "3", "4", "5", "6"];

/// Unwraps an answer, or returns `Reply::End` from the enclosing function.
macro_rules! answer {
    ($reply:expr) => {
        match $reply {
            Reply::Answer(value) => value,
            Reply::End => return Ok(Reply::End),
        }
    };
}

/// Owns the loader, the console and, while analysing, the one live dataset.
pub struct Session<S, C> {
    loader: DatasetLoader<S>,
    console: C,
}

impl<S, C> Session<S, C>
where
    S: SourceReader,
    C: Prompter + Screen,
{
    pub fn new(loader: DatasetLoader<S>, console: C) -> Self {
        Self { loader, console }
    }

    pub fn into_console(self) -> C {
        self.console
    }

    /// Runs until the user declines to restart or types `end`.
    pub fn run(&mut self) -> Result<()> {
        if self.run_until_end()? == Reply::End {
            info!("Session ended by user");
        }
        Ok(())
    }

    fn run_until_end(&mut self) -> Result<Reply<()>> {
        loop {
            let dataset = answer!(self.select_and_load()?);
            answer!(self.analyze(&dataset)?);
            drop(dataset);

            if !answer!(self.console.confirm("\nRestart? [y] Yes [n] No\n>")?) {
                return Ok(Reply::Answer(()));
            }
        }
    }

    /// Asks for filters until a load succeeds.
    fn select_and_load(&mut self) -> Result<Reply<Dataset>> {
        loop {
            let (cities, spec) = answer!(self.select_filters()?);

            self.console.show("\nLoading data...")?;
            let started = Instant::now();
            match self.loader.load(&cities, &spec) {
                Ok(dataset) => {
                    self.console.show(&format!(
                        "\nData loaded in {:.2} seconds.",
                        started.elapsed().as_secs_f64()
                    ))?;
                    self.console.show(&"-".repeat(40))?;
                    return Ok(Reply::Answer(dataset));
                }
                Err(e) => {
                    warn!(error = %e, "Load failed");
                    self.console.show(&format!("\n{e}"))?;
                }
            }
        }
    }

    fn select_filters(&mut self) -> Result<Reply<(Vec<City>, FilterSpec)>> {
        let city_keys: Vec<&str> = City::ALL.into_iter().map(City::key).collect();
        let month_keys = lowercase(MONTHS.into_iter().filter_map(month_name));
        let weekday_keys = lowercase(WEEKDAYS.into_iter().map(weekday_name));

        self.console.show("\nLet's explore some US bikeshare data!\n")?;
        self.console.show("Type 'end' anytime to exit the program.\n")?;

        loop {
            let cities = answer!(self.console.choose(
                "\nSelect city(ies) (New York City, Chicago, Washington). Use commas to list multiple:\n>",
                &city_keys,
            )?);
            let months = answer!(self.console.choose(
                "\nSelect month(s) (January to June). Use commas to list multiple:\n>",
                &as_refs(&month_keys),
            )?);
            let weekdays = answer!(self.console.choose(
                "\nSelect weekday(s). Use commas to list multiple:\n>",
                &as_refs(&weekday_keys),
            )?);

            let cities = cities
                .iter()
                .map(|c| c.parse::<City>())
                .collect::<Result<Vec<_>, _>>()?;
            let spec = FilterSpec::parse(&months, &weekdays)?;

            let summary = format!(
                "\nConfirm filters:\n City(ies): {}\n Month(s): {}\n Weekday(s): {}\n [y] Yes [n] No\n>",
                join_names(cities.iter().copied()),
                spec.month_names().join(", "),
                spec.weekday_names().join(", "),
            );
            if answer!(self.console.confirm(&summary)?) {
                self.console.show(&"-".repeat(40))?;
                return Ok(Reply::Answer((cities, spec)));
            }
            self.console.show("\nLet's try again!")?;
        }
    }

    /// The action menu over one loaded dataset; returns when "Restart" is picked.
    fn analyze(&mut self, dataset: &Dataset) -> Result<Reply<()>> {
        loop {
            let option = answer!(self.console.choose(MENU, MENU_OPTIONS)?);
            let [option] = option.as_slice() else {
                continue;
            };

            info!(option = option.as_str(), rows = dataset.len(), "Menu option");
            match option.as_str() {
                "1" => self.show_stats(TimeStats::from_dataset(dataset).map(|s| render_time(&s)))?,
                "2" => self.show_stats(
                    StationStats::from_dataset(dataset).map(|s| render_station(&s)),
                )?,
                "3" => self
                    .console
                    .show(&render_duration(&DurationStats::from_dataset(dataset)))?,
                "4" => self.show_stats(UserStats::from_dataset(dataset).map(|s| render_user(&s)))?,
                "5" => answer!(self.page_raw(dataset)?),
                _ => return Ok(Reply::Answer(())),
            }
        }
    }

    fn show_stats(&mut self, rendered: Result<String, StatsError>) -> Result<()> {
        match rendered {
            Ok(text) => self.console.show(&text),
            Err(e) => {
                warn!(error = %e, "Query returned no data");
                self.console.show(NO_DATA)
            }
        }
    }

    fn page_raw(&mut self, dataset: &Dataset) -> Result<Reply<()>> {
        let mut pager = RawDataPager::new(dataset);
        loop {
            let page = pager.next_page();
            if page.is_empty() {
                self.console.show("\nNo more raw data.")?;
            } else {
                self.console.show(&format!("\n{}", render_page(page)))?;
            }

            if !answer!(self.console.confirm("\nShow more raw data? [y] Yes [n] No\n>")?) {
                return Ok(Reply::Answer(()));
            }
        }
    }
}

fn lowercase<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    names.map(str::to_lowercase).collect()
}

fn as_refs(keys: &[String]) -> Vec<&str> {
    keys.iter().map(String::as_str).collect()
}
