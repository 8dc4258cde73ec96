use thiserror::Error;

use setup_mariadb_platform::OsReleaseError;

#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("Invalid MariaDB version: {tag}")]
    UnsupportedVersion { tag: String },

    #[error("No installer release is known for MariaDB {tag}")]
    UnknownVersionMapping { tag: String },

    #[error("Could not determine the Ubuntu release codename: {0}")]
    UnknownReleaseCodename(#[from] OsReleaseError),

    #[error("Failed to launch `{command}`: {source}")]
    CommandLaunch {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write input to `{command}`: {source}")]
    CommandInput {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command `{command}` failed with {}", exit_description(.code))]
    CommandFailed { command: String, code: Option<i32> },

    #[error("Failed to build installer download client: {0}")]
    DownloadClient(#[source] reqwest::Error),

    #[error("Failed to download installer from {url}: {source}")]
    DownloadRequest {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Installer download failed with HTTP {status} for {url}")]
    DownloadStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Failed to write installer to {path}: {source}")]
    DownloadWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create working directory: {0}")]
    WorkDir(#[source] std::io::Error),

    #[error("Failed to append to path file {path}: {source}")]
    PathFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[allow(clippy::ref_option)]
fn exit_description(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "no exit code (terminated by signal)".to_string(),
    }
}
