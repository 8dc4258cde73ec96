//! MariaDB provisioning for CI runners.
//!
//! This crate turns a requested release tag and the host's platform into an
//! ordered list of package-manager, service and client commands, then runs
//! them one after another:
//! - Version validation and the release tables.
//! - Per-platform planning (Homebrew, MSI installer, apt).
//! - Step execution against the host, including the installer download.
//! - Publication of the server's binary directory to the runner's path file.

mod config;
mod download;
mod error;
mod executor;
mod path_file;
pub mod plan;
mod probe;
mod provisioner;
mod step;
mod version;

/// Inputs read from the runner environment.
pub use config::{ProvisionConfig, WINDOWS_ADMIN_USER};
/// Error taxonomy shared by every step.
pub use error::ProvisionError;
/// Step execution seam and its host implementation.
pub use executor::{StepExecutor, SystemExecutor};
pub use path_file::PathFile;
/// Read-only host queries used while planning.
pub use probe::{HostProbe, SystemProbe};
pub use provisioner::Provisioner;
pub use step::{BinDirectory, CommandStep, Plan, Step};
/// Supported release tags and their derived names.
pub use version::{DEFAULT_VERSION, VersionSpec, VersionTrack};
