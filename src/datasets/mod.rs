use std::path::PathBuf;

use async_trait::async_trait;
use url::Url;

use crate::errors::{MatchError, MatchResult};
use crate::models::config::AppConfig;

pub mod archive;
pub mod direct;
pub mod tables;

use crate::datasets::archive::{CordisArchiveSource, DatasetCache};
use crate::datasets::direct::DirectCsvSource;
use crate::domain::organization::OrganizationTable;
use crate::domain::project::ProjectTable;

/// File names the two tables are cached under, matching the CORDIS archive.
pub const PROJECTS_FILE: &str = "project.csv";
pub const ORGANIZATIONS_FILE: &str = "organization.csv";

/// The CORDIS download endpoint rejects clients without a browser user agent.
pub(crate) const BROWSER_USER_AGENT: &str = "Mozilla/5.0";

/// Local CSV files holding the two tables, ready for parsing.
#[derive(Debug, Clone)]
pub struct DatasetFiles {
    pub projects: PathBuf,
    pub organizations: PathBuf,
}

/// An abstraction over dataset sources that produce the two CSV tables.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// Fetches (or reuses) the tables and returns their local paths.
    async fn fetch(&self) -> MatchResult<DatasetFiles>;
}

/// A table source given on the command line: a URL to download or a local path.
#[derive(Debug, Clone)]
pub enum TableLocation {
    Remote(Url),
    Local(PathBuf),
}

impl TableLocation {
    /// Anything that parses as an http(s) URL is remote, the rest is a path.
    pub fn parse(raw: &str) -> Self {
        match Url::parse(raw) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Self::Remote(url),
            _ => Self::Local(PathBuf::from(raw)),
        }
    }
}

/// Picks the dataset source for this run: explicit per-table locations when
/// both overrides are given, otherwise the configured CORDIS archive.
pub fn open_source(
    config: &AppConfig,
    projects: Option<&str>,
    organizations: Option<&str>,
) -> Box<dyn DatasetSource> {
    let cache = DatasetCache::new(config.data_dir.clone(), config.cache_max_age_days);
    match (projects, organizations) {
        (Some(projects), Some(organizations)) => Box::new(DirectCsvSource::new(
            TableLocation::parse(projects),
            TableLocation::parse(organizations),
            cache,
        )),
        _ => Box::new(CordisArchiveSource::new(config.archive_url.clone(), cache)),
    }
}

/// Fetches both tables through `source` and parses them into domain records.
///
/// Both parsers insist on their project-identifier column, so the tables are
/// guaranteed to share the join key before anything downstream runs.
pub async fn load(
    source: &dyn DatasetSource,
    delimiter: u8,
) -> MatchResult<(ProjectTable, OrganizationTable)> {
    let files = source.fetch().await?;
    let projects = tables::load_projects(&files.projects, delimiter)?;
    let organizations = tables::load_organizations(&files.organizations, delimiter)?;
    log::info!(
        "Loaded {} projects and {} organizations",
        projects.len(),
        organizations.len()
    );
    Ok((projects, organizations))
}

/// Downloads `url` fully into memory, surfacing any failure as an
/// unavailable-dataset error naming that URL.
pub(crate) async fn download(client: &reqwest::Client, url: &str) -> MatchResult<Vec<u8>> {
    let response = client
        .get(url)
        .header(reqwest::header::USER_AGENT, BROWSER_USER_AGENT)
        .send()
        .await
        .map_err(|err| MatchError::unavailable(url, err))?
        .error_for_status()
        .map_err(|err| MatchError::unavailable(url, err))?;
    let bytes = response
        .bytes()
        .await
        .map_err(|err| MatchError::unavailable(url, err))?;
    Ok(bytes.to_vec())
}
