use std::path::Path;

use thiserror::Error;

pub const OS_RELEASE_PATH: &str = "/etc/os-release";

#[derive(Debug, Error)]
pub enum OsReleaseError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{path} does not define VERSION_CODENAME")]
    MissingCodename { path: String },
}

/// Read `VERSION_CODENAME` from an os-release file.
///
/// # Errors
/// Returns an error if the file cannot be read or does not carry a non-empty
/// codename.
pub fn release_codename(path: &Path) -> Result<String, OsReleaseError> {
    let content = std::fs::read_to_string(path).map_err(|source| OsReleaseError::Read {
        path: path.display().to_string(),
        source,
    })?;

    parse_codename(&content).ok_or_else(|| OsReleaseError::MissingCodename {
        path: path.display().to_string(),
    })
}

fn parse_codename(content: &str) -> Option<String> {
    content
        .lines()
        .filter_map(|line| line.trim().split_once('='))
        .find(|(key, _)| *key == "VERSION_CODENAME")
        .map(|(_, value)| unquote(value.trim()).to_string())
        .filter(|value| !value.is_empty())
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::{OsReleaseError, parse_codename, release_codename};

    const UBUNTU: &str = r#"PRETTY_NAME="Ubuntu 22.04.4 LTS"
NAME="Ubuntu"
VERSION_ID="22.04"
VERSION="22.04.4 LTS (Jammy Jellyfish)"
VERSION_CODENAME=jammy
ID=ubuntu
ID_LIKE=debian
UBUNTU_CODENAME=jammy
"#;

    #[test]
    fn parses_unquoted_codename() {
        assert_eq!(parse_codename(UBUNTU).as_deref(), Some("jammy"));
    }

    #[test]
    fn parses_quoted_codename() {
        assert_eq!(
            parse_codename("VERSION_CODENAME=\"noble\"\n").as_deref(),
            Some("noble")
        );
        assert_eq!(
            parse_codename("VERSION_CODENAME='focal'\n").as_deref(),
            Some("focal")
        );
    }

    #[test]
    fn missing_or_empty_codename_is_none() {
        assert_eq!(parse_codename("ID=alpine\nVERSION_ID=3.19\n"), None);
        assert_eq!(parse_codename("VERSION_CODENAME=\n"), None);
    }

    #[test]
    fn reads_codename_from_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("os-release");
        std::fs::write(&path, UBUNTU).expect("write os-release");

        assert_eq!(release_codename(&path).expect("codename"), "jammy");
    }

    #[test]
    fn missing_file_reports_read_error() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let error = release_codename(&dir.path().join("absent")).unwrap_err();

        assert!(matches!(error, OsReleaseError::Read { .. }));
    }
}
