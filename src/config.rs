use anyhow::{Context, Result};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use crate::city::City;

/// Maps city keys to the trip-log files they are read from.
///
/// Built once and handed to the source reader; it never changes afterwards.
/// On disk it is a plain JSON object:
/// ```json
/// {
///   "chicago": "data/chicago.csv",
///   "new york city": "/srv/bikeshare/nyc.csv"
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct CityTable {
    entries: BTreeMap<City, PathBuf>,
}

impl CityTable {
    /// The default table: every city's standard file name under `dir`.
    pub fn with_data_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let entries = City::ALL
            .into_iter()
            .map(|city| (city, dir.join(city.default_file_name())))
            .collect();
        Self { entries }
    }

    /// Loads the table from a JSON file at `path`.
    ///
    /// Relative file paths are resolved against the directory holding `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading city table {}", path.display()))?;
        let raw: HashMap<String, PathBuf> = serde_json::from_str(&content)
            .with_context(|| format!("parsing city table {}", path.display()))?;

        let base = path.parent().unwrap_or(Path::new("."));
        let mut entries = BTreeMap::new();
        for (key, file) in raw {
            let city: City = key.parse()?;
            let file = if file.is_relative() { base.join(file) } else { file };
            entries.insert(city, file);
        }

        Ok(Self { entries })
    }

    /// Adds or replaces the file for `city`.
    pub fn with_entry(mut self, city: City, file: impl Into<PathBuf>) -> Self {
        self.entries.insert(city, file.into());
        self
    }

    /// Returns the file configured for `city`, if any.
    pub fn path(&self, city: City) -> Option<&Path> {
        self.entries.get(&city).map(PathBuf::as_path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (City, &Path)> {
        self.entries.iter().map(|(c, p)| (*c, p.as_path()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> PathBuf {
        env::temp_dir().join(name)
    }

    #[test]
    fn test_default_table_covers_every_city() {
        let table = CityTable::with_data_dir("data");
        assert_eq!(table.iter().count(), 3);
        assert_eq!(
            table.path(City::NewYorkCity),
            Some(Path::new("data/new_york_city.csv"))
        );
    }

    #[test]
    fn test_load_resolves_relative_paths() {
        let path = temp_path("bikeshare_explorer_test_table.json");
        fs::write(
            &path,
            r#"{"Chicago": "chi.csv", "washington": "/abs/wash.csv"}"#,
        )
        .unwrap();

        let table = CityTable::load(&path).unwrap();
        assert_eq!(table.path(City::Chicago), Some(env::temp_dir().join("chi.csv").as_path()));
        assert_eq!(table.path(City::Washington), Some(Path::new("/abs/wash.csv")));
        assert_eq!(table.path(City::NewYorkCity), None);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_rejects_unknown_city() {
        let path = temp_path("bikeshare_explorer_test_bad_table.json");
        fs::write(&path, r#"{"boston": "boston.csv"}"#).unwrap();

        assert!(CityTable::load(&path).is_err());

        fs::remove_file(&path).unwrap();
    }
}
