use serde::{Deserialize, Serialize};

/// CI provider images with a preinstalled MySQL service and a known Ubuntu
/// release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ManagedImage {
    Ubuntu20,
    Ubuntu22,
    Ubuntu24,
}

impl ManagedImage {
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "ubuntu20" => Some(Self::Ubuntu20),
            "ubuntu22" => Some(Self::Ubuntu22),
            "ubuntu24" => Some(Self::Ubuntu24),
            _ => None,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Ubuntu20 => "ubuntu20",
            Self::Ubuntu22 => "ubuntu22",
            Self::Ubuntu24 => "ubuntu24",
        }
    }

    /// Ubuntu release codename, used as the apt suite.
    #[must_use]
    pub fn codename(self) -> &'static str {
        match self {
            Self::Ubuntu20 => "focal",
            Self::Ubuntu22 => "jammy",
            Self::Ubuntu24 => "noble",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "image", rename_all = "kebab-case")]
pub enum PlatformTarget {
    MacOs,
    Windows,
    LinuxManagedImage(ManagedImage),
    LinuxOther,
}

impl PlatformTarget {
    /// Detect the target of the running process.
    ///
    /// The OS family is fixed at compile time; the managed image comes from
    /// the `ImageOS` variable set by hosted runners.
    #[must_use]
    pub fn detect() -> Self {
        Self::detect_with(std::env::consts::OS, |name| std::env::var(name))
    }

    pub fn detect_with<F>(os: &str, get_var: F) -> Self
    where
        F: Fn(&str) -> Result<String, std::env::VarError>,
    {
        match os {
            "macos" => Self::MacOs,
            "windows" => Self::Windows,
            _ => get_var("ImageOS")
                .ok()
                .and_then(|label| ManagedImage::from_label(label.trim()))
                .map_or(Self::LinuxOther, Self::LinuxManagedImage),
        }
    }

    #[must_use]
    pub fn display_name(&self) -> String {
        match self {
            Self::MacOs => "macOS".to_string(),
            Self::Windows => "Windows".to_string(),
            Self::LinuxManagedImage(image) => format!("Linux ({})", image.label()),
            Self::LinuxOther => "Linux".to_string(),
        }
    }

    #[must_use]
    pub fn is_windows(&self) -> bool {
        matches!(self, Self::Windows)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    Arm64,
    X64,
    Other,
}

impl Arch {
    #[must_use]
    pub fn detect() -> Self {
        Self::from_target(std::env::consts::ARCH)
    }

    #[must_use]
    pub fn from_target(arch: &str) -> Self {
        match arch {
            "aarch64" | "arm64" => Self::Arm64,
            "x86_64" | "x64" => Self::X64,
            _ => Self::Other,
        }
    }
}
