//! Downloads the CORDIS ZIP archive and caches the extracted tables.

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::datasets::{DatasetFiles, DatasetSource, ORGANIZATIONS_FILE, PROJECTS_FILE, download};
use crate::errors::{MatchError, MatchResult};

/// Cache of extracted tables with an explicit lifetime: files older than the
/// configured maximum age are treated as absent and re-fetched.
#[derive(Debug, Clone)]
pub struct DatasetCache {
    dir: PathBuf,
    max_age: Duration,
}

impl DatasetCache {
    pub fn new(dir: PathBuf, max_age_days: i64) -> Self {
        Self {
            dir,
            max_age: Duration::days(max_age_days),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }

    pub fn ensure_dir(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.dir)
    }

    /// True when every path exists and was modified within the maximum age.
    pub fn is_fresh<P: AsRef<Path>>(&self, paths: &[P]) -> bool {
        paths.iter().all(|path| self.file_is_fresh(path.as_ref()))
    }

    fn file_is_fresh(&self, path: &Path) -> bool {
        let Ok(metadata) = fs::metadata(path) else {
            return false;
        };
        let Ok(modified) = metadata.modified() else {
            return false;
        };
        let modified: DateTime<Utc> = modified.into();
        Utc::now() - modified <= self.max_age
    }
}

/// Fetches both tables from the single CORDIS ZIP archive.
pub struct CordisArchiveSource {
    url: String,
    cache: DatasetCache,
    client: reqwest::Client,
}

impl CordisArchiveSource {
    pub fn new(url: String, cache: DatasetCache) -> Self {
        Self {
            url,
            cache,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl DatasetSource for CordisArchiveSource {
    async fn fetch(&self) -> MatchResult<DatasetFiles> {
        let projects = self.cache.path(PROJECTS_FILE);
        let organizations = self.cache.path(ORGANIZATIONS_FILE);
        if self.cache.is_fresh(&[&projects, &organizations]) {
            log::info!("Using cached tables in {}", self.cache.dir().display());
            return Ok(DatasetFiles {
                projects,
                organizations,
            });
        }

        self.cache
            .ensure_dir()
            .map_err(|err| MatchError::unavailable(&self.url, err))?;

        log::info!("Downloading {}", self.url);
        let bytes = download(&self.client, &self.url).await?;
        log::info!("Extracting archive ({} bytes)", bytes.len());
        extract_tables(&bytes, &self.cache, &self.url)?;

        for (path, file_name) in [
            (&projects, PROJECTS_FILE),
            (&organizations, ORGANIZATIONS_FILE),
        ] {
            if !path.is_file() {
                return Err(MatchError::unavailable(
                    &self.url,
                    format!("archive does not contain {file_name}"),
                ));
            }
        }

        Ok(DatasetFiles {
            projects,
            organizations,
        })
    }
}

/// Writes the two known tables out of the archive into the cache directory.
/// Other archive members are ignored.
fn extract_tables(bytes: &[u8], cache: &DatasetCache, source: &str) -> MatchResult<()> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|err| MatchError::unavailable(source, err))?;
    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .map_err(|err| MatchError::unavailable(source, err))?;
        let file_name = entry
            .name()
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_string();
        if file_name == PROJECTS_FILE || file_name == ORGANIZATIONS_FILE {
            let mut output = fs::File::create(cache.path(&file_name))
                .map_err(|err| MatchError::unavailable(source, err))?;
            std::io::copy(&mut entry, &mut output)
                .map_err(|err| MatchError::unavailable(source, err))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_files_are_not_fresh() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DatasetCache::new(dir.path().to_path_buf(), 30);
        assert!(!cache.is_fresh(&[&cache.path(PROJECTS_FILE)]));
    }

    #[test]
    fn recent_files_are_fresh_and_expired_files_are_not() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(PROJECTS_FILE);
        fs::File::create(&path)
            .unwrap()
            .write_all(b"id;title\n")
            .unwrap();

        let cache = DatasetCache::new(dir.path().to_path_buf(), 30);
        assert!(cache.is_fresh(&[&path]));

        let expired = DatasetCache::new(dir.path().to_path_buf(), 0);
        assert!(!expired.is_fresh(&[&path]));
    }

    #[test]
    fn extracts_only_the_known_tables() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DatasetCache::new(dir.path().to_path_buf(), 30);

        let mut buffer = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut buffer);
            let options = zip::write::SimpleFileOptions::default();
            writer.start_file("project.csv", options).unwrap();
            writer.write_all(b"id;title;objective\n").unwrap();
            writer.start_file("organization.csv", options).unwrap();
            writer.write_all(b"projectID;name;role\n").unwrap();
            writer.start_file("readme.txt", options).unwrap();
            writer.write_all(b"ignored").unwrap();
            writer.finish().unwrap();
        }

        extract_tables(buffer.get_ref(), &cache, "test-archive").unwrap();
        assert!(cache.path(PROJECTS_FILE).is_file());
        assert!(cache.path(ORGANIZATIONS_FILE).is_file());
        assert!(!cache.path("readme.txt").exists());
    }
}
