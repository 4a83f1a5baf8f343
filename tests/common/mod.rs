//! Helpers for integration tests.

use std::io::Write;
use std::path::PathBuf;

use tempfile::TempDir;

/// Temporary dataset directory used in integration tests. The directory and
/// everything in it is removed on drop.
pub struct TestDataset {
    dir: TempDir,
}

impl TestDataset {
    pub fn new(projects_csv: &str, organizations_csv: &str) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temporary dataset directory.");
        let dataset = TestDataset { dir };
        dataset.write("project.csv", projects_csv);
        dataset.write("organization.csv", organizations_csv);
        dataset
    }

    fn write(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        let mut file = std::fs::File::create(path).expect("Failed to create dataset file.");
        file.write_all(content.as_bytes())
            .expect("Failed to write dataset file.");
    }

    pub fn projects_path(&self) -> PathBuf {
        self.dir.path().join("project.csv")
    }

    pub fn organizations_path(&self) -> PathBuf {
        self.dir.path().join("organization.csv")
    }

    pub fn scratch_path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}
