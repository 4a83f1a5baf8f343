//! Per-table sources given explicitly on the command line.

use std::fs;
use std::path::PathBuf;

use async_trait::async_trait;
use futures::future;

use crate::datasets::archive::DatasetCache;
use crate::datasets::{
    DatasetFiles, DatasetSource, ORGANIZATIONS_FILE, PROJECTS_FILE, TableLocation, download,
};
use crate::errors::{MatchError, MatchResult};

/// Loads each table from its own location, bypassing the combined archive.
/// Remote tables land in the cache directory; local paths are used as-is.
pub struct DirectCsvSource {
    projects: TableLocation,
    organizations: TableLocation,
    cache: DatasetCache,
    client: reqwest::Client,
}

impl DirectCsvSource {
    pub fn new(projects: TableLocation, organizations: TableLocation, cache: DatasetCache) -> Self {
        Self {
            projects,
            organizations,
            cache,
            client: reqwest::Client::new(),
        }
    }

    async fn materialize(&self, location: &TableLocation, file_name: &str) -> MatchResult<PathBuf> {
        match location {
            TableLocation::Local(path) => {
                if path.is_file() {
                    Ok(path.clone())
                } else {
                    Err(MatchError::unavailable(
                        path.display().to_string(),
                        "no such file",
                    ))
                }
            }
            TableLocation::Remote(url) => {
                let target = self.cache.path(file_name);
                if self.cache.is_fresh(&[&target]) {
                    log::info!("Using cached {file_name}");
                    return Ok(target);
                }
                self.cache
                    .ensure_dir()
                    .map_err(|err| MatchError::unavailable(url.as_str(), err))?;
                log::info!("Downloading {url}");
                let bytes = download(&self.client, url.as_str()).await?;
                fs::write(&target, &bytes)
                    .map_err(|err| MatchError::unavailable(url.as_str(), err))?;
                Ok(target)
            }
        }
    }
}

#[async_trait]
impl DatasetSource for DirectCsvSource {
    async fn fetch(&self) -> MatchResult<DatasetFiles> {
        let (projects, organizations) = future::try_join(
            self.materialize(&self.projects, PROJECTS_FILE),
            self.materialize(&self.organizations, ORGANIZATIONS_FILE),
        )
        .await?;
        Ok(DatasetFiles {
            projects,
            organizations,
        })
    }
}
