/// Environment changes applied to a single spawned command.
///
/// The provisioner never mutates its own process environment; each command
/// receives this overlay on top of the inherited one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandEnv {
    removed: Vec<String>,
    set: Vec<(String, String)>,
}

impl CommandEnv {
    /// Overlay used for every provisioning command.
    ///
    /// Homebrew changes its behaviour when `CI` is present, and the dependents
    /// check after `brew install` is slow and irrelevant on a fresh runner.
    #[must_use]
    pub fn ci() -> Self {
        Self::default()
            .without("CI")
            .with("HOMEBREW_NO_INSTALLED_DEPENDENTS_CHECK", "1")
    }

    #[must_use]
    pub fn without(mut self, name: impl Into<String>) -> Self {
        self.removed.push(name.into());
        self
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set.push((name.into(), value.into()));
        self
    }

    pub fn removed(&self) -> impl Iterator<Item = &str> {
        self.removed.iter().map(String::as_str)
    }

    pub fn set(&self) -> impl Iterator<Item = (&str, &str)> {
        self.set.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

pub trait ApplyCommandEnv {
    fn apply_env(&mut self, env: &CommandEnv) -> &mut Self;
}

impl ApplyCommandEnv for tokio::process::Command {
    fn apply_env(&mut self, env: &CommandEnv) -> &mut Self {
        for name in env.removed() {
            self.env_remove(name);
        }
        for (name, value) in env.set() {
            self.env(name, value);
        }
        self
    }
}

impl ApplyCommandEnv for std::process::Command {
    fn apply_env(&mut self, env: &CommandEnv) -> &mut Self {
        for name in env.removed() {
            self.env_remove(name);
        }
        for (name, value) in env.set() {
            self.env(name, value);
        }
        self
    }
}
