//! Configuration model loaded from external sources.

use std::path::PathBuf;

use serde::Deserialize;

use crate::errors::MatchResult;

/// CORDIS Horizon Europe projects dump (projects + organizations CSVs).
pub const DEFAULT_ARCHIVE_URL: &str =
    "https://cordis.europa.eu/data/cordis-HORIZONprojects-csv.zip";

#[derive(Clone, Debug, Deserialize)]
/// Dataset and cache settings shared across the pipeline.
pub struct AppConfig {
    /// ZIP archive holding both CSV tables.
    #[serde(default = "default_archive_url")]
    pub archive_url: String,
    /// Directory the archive is extracted into and reused from.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// ASCII field delimiter of the CSV tables.
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    /// Cached CSVs older than this are re-downloaded.
    #[serde(default = "default_cache_max_age_days")]
    pub cache_max_age_days: i64,
}

impl AppConfig {
    /// Loads configuration from an optional YAML file plus `CORDIS_MATCH_*`
    /// environment variables; every field has a default.
    pub fn load(file: Option<&str>) -> MatchResult<Self> {
        let file_source = match file {
            Some(path) => config::File::with_name(path).required(true),
            None => config::File::with_name("cordis-match").required(false),
        };
        let settings = config::Config::builder()
            .add_source(file_source)
            .add_source(config::Environment::with_prefix("CORDIS_MATCH"))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    pub fn delimiter_byte(&self) -> u8 {
        self.delimiter as u8
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            archive_url: default_archive_url(),
            data_dir: default_data_dir(),
            delimiter: default_delimiter(),
            cache_max_age_days: default_cache_max_age_days(),
        }
    }
}

fn default_archive_url() -> String {
    DEFAULT_ARCHIVE_URL.to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("cordis_data")
}

fn default_delimiter() -> char {
    ';'
}

fn default_cache_max_age_days() -> i64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_field() {
        let config = AppConfig::default();
        assert_eq!(config.archive_url, DEFAULT_ARCHIVE_URL);
        assert_eq!(config.delimiter_byte(), b';');
        assert_eq!(config.cache_max_age_days, 30);
        assert_eq!(config.data_dir, PathBuf::from("cordis_data"));
    }
}
