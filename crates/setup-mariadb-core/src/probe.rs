use std::path::Path;

use setup_mariadb_platform::{OS_RELEASE_PATH, OsReleaseError, release_codename};

/// Read-only questions asked about the host while planning.
pub trait HostProbe {
    fn path_exists(&self, path: &Path) -> bool;

    /// Release codename of the running Linux distribution.
    ///
    /// # Errors
    /// Returns an error if the os-release metadata is unreadable or lacks a
    /// codename.
    fn release_codename(&self) -> Result<String, OsReleaseError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProbe;

impl HostProbe for SystemProbe {
    fn path_exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn release_codename(&self) -> Result<String, OsReleaseError> {
        release_codename(Path::new(OS_RELEASE_PATH))
    }
}
