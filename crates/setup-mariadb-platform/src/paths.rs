use std::path::PathBuf;

use crate::Arch;

/// Homebrew install locations for one CPU architecture.
///
/// Apple silicon installs keep prefix and repository together under
/// `/opt/homebrew`; Intel installs split them between `/usr/local` and
/// `/usr/local/Homebrew`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomebrewPaths {
    pub prefix: PathBuf,
    pub repository: PathBuf,
}

impl HomebrewPaths {
    #[must_use]
    pub fn for_arch(arch: Arch) -> Self {
        match arch {
            Arch::Arm64 => Self {
                prefix: PathBuf::from("/opt/homebrew"),
                repository: PathBuf::from("/opt/homebrew"),
            },
            Arch::X64 | Arch::Other => Self {
                prefix: PathBuf::from("/usr/local"),
                repository: PathBuf::from("/usr/local/Homebrew"),
            },
        }
    }

    #[must_use]
    pub fn core_tap(&self) -> PathBuf {
        self.repository.join("Library/Taps/homebrew/homebrew-core")
    }

    /// Files whose presence means the local tap already knows `formula`.
    #[must_use]
    pub fn formula_definitions(&self, formula: &str) -> [PathBuf; 2] {
        let tap = self.core_tap();
        let shard = formula.chars().next().map(String::from).unwrap_or_default();
        [
            tap.join("Formula")
                .join(shard)
                .join(format!("{formula}.rb")),
            tap.join("Aliases").join(formula),
        ]
    }

    #[must_use]
    pub fn formula_bin(&self, formula: &str) -> PathBuf {
        self.prefix.join("opt").join(formula).join("bin")
    }
}
