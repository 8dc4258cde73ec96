//! Host facts for the MariaDB provisioner.
//!
//! Everything here is read-only with respect to the host: platform and
//! architecture detection, the managed-image table, Homebrew locations,
//! `/etc/os-release` parsing and the environment overlay applied to every
//! spawned command.

pub mod commands;
mod environment;
mod os_release;
mod paths;

/// Extension trait applying a [`CommandEnv`] overlay to command builders.
pub use commands::{ApplyCommandEnv, CommandEnv};
/// Platform target, managed image and CPU architecture detection.
pub use environment::{Arch, ManagedImage, PlatformTarget};
/// `/etc/os-release` lookup.
pub use os_release::{OS_RELEASE_PATH, OsReleaseError, release_codename};
/// Homebrew prefix and tap locations.
pub use paths::HomebrewPaths;
