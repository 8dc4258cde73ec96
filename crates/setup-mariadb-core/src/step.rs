use std::fmt;
use std::path::PathBuf;

/// One external command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandStep {
    pub program: String,
    pub args: Vec<String>,
    pub stdin: Option<String>,
    pub current_dir: Option<PathBuf>,
}

impl CommandStep {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            stdin: None,
            current_dir: None,
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn stdin(mut self, input: impl Into<String>) -> Self {
        self.stdin = Some(input.into());
        self
    }

    #[must_use]
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// Shorthand for `sudo <program> <args..>`.
    pub fn sudo<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new("sudo").arg(program).args(args)
    }

    /// Full command line, used for logging and error messages.
    #[must_use]
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .map(quote_for_display)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for CommandStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line())
    }
}

fn quote_for_display(part: &str) -> String {
    if part.is_empty() {
        return "''".to_string();
    }
    if part.chars().any(|c| c.is_whitespace() || c == '\'' || c == '"') {
        format!("\"{}\"", part.replace('"', "\\\""))
    } else {
        part.to_string()
    }
}

/// Directory holding the server's client executables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinDirectory {
    path: String,
    windows: bool,
}

impl BinDirectory {
    pub fn posix(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            windows: false,
        }
    }

    pub fn windows(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            windows: true,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.path
    }

    /// Path of a client executable inside this directory.
    #[must_use]
    pub fn executable(&self, name: &str) -> String {
        if self.windows {
            format!("{}\\{name}.exe", self.path)
        } else {
            format!("{}/{name}", self.path)
        }
    }
}

impl fmt::Display for BinDirectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Run(CommandStep),
    Download { url: String, destination: PathBuf },
    ExportPath(BinDirectory),
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Run(command) => write!(f, "{command}"),
            Self::Download { url, destination } => {
                write!(f, "download {url} -> {}", destination.display())
            }
            Self::ExportPath(bin) => write!(f, "add {bin} to PATH"),
        }
    }
}

/// Ordered steps for one platform plus the resulting binary directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub steps: Vec<Step>,
    pub bin_dir: BinDirectory,
}

impl Plan {
    pub fn commands(&self) -> impl Iterator<Item = &CommandStep> {
        self.steps.iter().filter_map(|step| match step {
            Step::Run(command) => Some(command),
            _ => None,
        })
    }
}
