use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ProvisionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VersionTrack {
    LongTerm,
    ShortTerm,
    Rolling,
}

/// Supported release tags, newest long-term release first.
const SUPPORTED_VERSIONS: [(&str, VersionTrack); 7] = [
    ("11.4", VersionTrack::LongTerm),
    ("10.11", VersionTrack::LongTerm),
    ("10.6", VersionTrack::LongTerm),
    ("10.5", VersionTrack::LongTerm),
    ("11.2", VersionTrack::ShortTerm),
    ("11.1", VersionTrack::ShortTerm),
    ("11.5", VersionTrack::Rolling),
];

/// Point release of each tag published as a Windows MSI.
const FULL_VERSIONS: [(&str, &str); 7] = [
    ("11.5", "11.5.2"),
    ("11.4", "11.4.3"),
    ("11.2", "11.2.5"),
    ("11.1", "11.1.6"),
    ("10.11", "10.11.9"),
    ("10.6", "10.6.19"),
    ("10.5", "10.5.26"),
];

/// Tags whose apt repository ships the server as plain `mariadb-server`.
const BARE_PACKAGE_TAGS: [&str; 5] = ["11.5", "11.4", "11.2", "11.1", "10.11"];

/// Last release whose Homebrew formula left the anonymous account without
/// privileges.
const ANONYMOUS_GRANT_TAG: &str = "10.3";

pub const DEFAULT_VERSION: &str = SUPPORTED_VERSIONS[0].0;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionSpec {
    tag: String,
    track: VersionTrack,
}

impl VersionSpec {
    /// Validate a requested tag against the supported set.
    ///
    /// # Errors
    /// Returns [`ProvisionError::UnsupportedVersion`] for any tag outside the set.
    pub fn parse(tag: &str) -> Result<Self, ProvisionError> {
        let tag = tag.trim();
        SUPPORTED_VERSIONS
            .iter()
            .find(|(supported, _)| *supported == tag)
            .map(|(_, track)| Self {
                tag: tag.to_string(),
                track: *track,
            })
            .ok_or_else(|| ProvisionError::UnsupportedVersion {
                tag: tag.to_string(),
            })
    }

    /// Retired releases were all long-term series.
    #[cfg(test)]
    pub(crate) fn unchecked(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            track: VersionTrack::LongTerm,
        }
    }

    #[must_use]
    pub fn default_version() -> Self {
        Self {
            tag: DEFAULT_VERSION.to_string(),
            track: SUPPORTED_VERSIONS[0].1,
        }
    }

    pub fn supported() -> impl Iterator<Item = (&'static str, VersionTrack)> {
        SUPPORTED_VERSIONS.into_iter()
    }

    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    #[must_use]
    pub fn track(&self) -> VersionTrack {
        self.track
    }

    /// Full dotted release used to build the Windows installer URL.
    ///
    /// # Errors
    /// Returns [`ProvisionError::UnknownVersionMapping`] when the tag has no
    /// entry in the resolution table.
    pub fn full_version(&self) -> Result<&'static str, ProvisionError> {
        FULL_VERSIONS
            .iter()
            .find(|(tag, _)| *tag == self.tag)
            .map(|(_, full)| *full)
            .ok_or_else(|| ProvisionError::UnknownVersionMapping {
                tag: self.tag.clone(),
            })
    }

    #[must_use]
    pub fn homebrew_formula(&self) -> String {
        format!("mariadb@{}", self.tag)
    }

    #[must_use]
    pub fn apt_package(&self) -> String {
        if BARE_PACKAGE_TAGS.contains(&self.tag.as_str()) {
            "mariadb-server".to_string()
        } else {
            format!("mariadb-server-{}", self.tag)
        }
    }

    #[must_use]
    pub fn needs_anonymous_grant(&self) -> bool {
        self.tag == ANONYMOUS_GRANT_TAG
    }
}

impl Default for VersionSpec {
    fn default() -> Self {
        Self::default_version()
    }
}

impl fmt::Display for VersionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag)
    }
}

#[cfg(test)]
mod tests {
    use super::{VersionSpec, VersionTrack};
    use crate::ProvisionError;

    #[test]
    fn default_is_newest_long_term_release() {
        let version = VersionSpec::default();
        assert_eq!(version.tag(), "11.4");
        assert_eq!(version.track(), VersionTrack::LongTerm);
    }

    #[test]
    fn parse_accepts_every_supported_tag() {
        for (tag, track) in VersionSpec::supported() {
            let version = VersionSpec::parse(tag).expect("supported tag should parse");
            assert_eq!(version.track(), track);
        }
    }

    #[test]
    fn parse_rejects_unsupported_tags() {
        for tag in ["10.3", "10.4", "11", "11.4.3", "latest", ""] {
            assert!(matches!(
                VersionSpec::parse(tag),
                Err(ProvisionError::UnsupportedVersion { .. })
            ));
        }
    }

    #[test]
    fn parse_trims_surrounding_whitespace() {
        assert_eq!(VersionSpec::parse(" 10.6\n").unwrap().tag(), "10.6");
    }

    #[test]
    fn every_supported_tag_resolves_to_a_full_version() {
        for (tag, _) in VersionSpec::supported() {
            let version = VersionSpec::parse(tag).unwrap();
            let full = version.full_version().expect("resolution table is complete");
            assert!(full.starts_with(&format!("{tag}.")));
        }
    }

    #[test]
    fn unmapped_tag_reports_mapping_error() {
        assert!(matches!(
            VersionSpec::unchecked("10.3").full_version(),
            Err(ProvisionError::UnknownVersionMapping { tag }) if tag == "10.3"
        ));
    }

    #[test]
    fn apt_package_is_bare_for_recent_releases() {
        assert_eq!(VersionSpec::parse("11.4").unwrap().apt_package(), "mariadb-server");
        assert_eq!(VersionSpec::parse("10.11").unwrap().apt_package(), "mariadb-server");
        assert_eq!(VersionSpec::parse("10.6").unwrap().apt_package(), "mariadb-server-10.6");
        assert_eq!(VersionSpec::parse("10.5").unwrap().apt_package(), "mariadb-server-10.5");
    }

    #[test]
    fn only_legacy_tag_needs_anonymous_grant() {
        assert!(VersionSpec::unchecked("10.3").needs_anonymous_grant());
        assert!(
            VersionSpec::supported()
                .all(|(tag, _)| !VersionSpec::parse(tag).unwrap().needs_anonymous_grant())
        );
    }

    #[test]
    fn homebrew_formula_is_versioned() {
        assert_eq!(
            VersionSpec::parse("11.2").unwrap().homebrew_formula(),
            "mariadb@11.2"
        );
    }
}
