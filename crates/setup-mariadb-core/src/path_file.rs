use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::ProvisionError;
use crate::step::BinDirectory;

/// The runner's path-extension file: each appended line is prepended to
/// `PATH` for later steps of the job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathFile {
    path: PathBuf,
}

impl PathFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `bin` as a new line.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or written.
    pub fn append(&self, bin: &BinDirectory) -> Result<(), ProvisionError> {
        let map_err = |source| ProvisionError::PathFile {
            path: self.path.display().to_string(),
            source,
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(map_err)?;
        writeln!(file, "{bin}").map_err(map_err)
    }
}

#[cfg(test)]
mod tests {
    use super::PathFile;
    use crate::step::BinDirectory;

    #[test]
    fn appends_directory_after_existing_entries() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("add_path");
        std::fs::write(&path, "/opt/tool/bin\n").expect("seed path file");

        PathFile::new(&path)
            .append(&BinDirectory::posix("/opt/homebrew/opt/mariadb@11.4/bin"))
            .expect("append");

        assert_eq!(
            std::fs::read_to_string(&path).expect("read path file"),
            "/opt/tool/bin\n/opt/homebrew/opt/mariadb@11.4/bin\n"
        );
    }

    #[test]
    fn creates_missing_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("add_path");

        PathFile::new(&path)
            .append(&BinDirectory::windows("C:\\Program Files\\MariaDB 11.4\\bin"))
            .expect("append");

        assert_eq!(
            std::fs::read_to_string(&path).expect("read path file"),
            "C:\\Program Files\\MariaDB 11.4\\bin\n"
        );
    }

    #[test]
    fn unwritable_location_is_reported() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("missing-dir").join("add_path");

        let error = PathFile::new(&path)
            .append(&BinDirectory::posix("/usr/bin"))
            .unwrap_err();

        assert!(error.to_string().contains("add_path"));
    }
}
