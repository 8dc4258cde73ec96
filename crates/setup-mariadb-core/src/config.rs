use std::env::VarError;
use std::path::PathBuf;

use setup_mariadb_platform::{Arch, PlatformTarget};

use crate::version::DEFAULT_VERSION;

pub const VERSION_INPUT: &str = "INPUT_MARIADB-VERSION";
pub const DATABASE_INPUT: &str = "INPUT_DATABASE";
pub const PATH_FILE_VAR: &str = "GITHUB_PATH";
pub const DEBUG_VAR: &str = "RUNNER_DEBUG";

/// Account granted admin rights on Windows runners.
pub const WINDOWS_ADMIN_USER: &str = "runneradmin";

/// Everything a provisioning run needs to know about its inputs and host.
///
/// The requested version is kept as raw text; validation happens in
/// [`crate::Provisioner::provision`] so that it fails before any command runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionConfig {
    pub version: String,
    pub database: Option<String>,
    pub target: PlatformTarget,
    pub arch: Arch,
    pub user: Option<String>,
    pub path_file: Option<PathBuf>,
    pub debug: bool,
}

impl ProvisionConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_with(
            PlatformTarget::detect(),
            Arch::detect(),
            |name| std::env::var(name),
        )
    }

    /// Build the configuration from an arbitrary variable lookup.
    ///
    /// Action inputs arrive as empty strings when not provided, so empty
    /// values count as unset.
    pub fn from_env_with<F>(target: PlatformTarget, arch: Arch, get_var: F) -> Self
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let non_empty = |name: &str| {
            get_var(name)
                .ok()
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            version: non_empty(VERSION_INPUT).unwrap_or_else(|| DEFAULT_VERSION.to_string()),
            database: non_empty(DATABASE_INPUT),
            target,
            arch,
            user: non_empty("USER"),
            path_file: non_empty(PATH_FILE_VAR).map(PathBuf::from),
            debug: non_empty(DEBUG_VAR).is_some_and(|value| value == "1"),
        }
    }

    /// Name of the local account that receives admin rights on the server.
    #[must_use]
    pub fn admin_user(&self) -> &str {
        if self.target.is_windows() {
            WINDOWS_ADMIN_USER
        } else {
            self.user.as_deref().unwrap_or("runner")
        }
    }
}
