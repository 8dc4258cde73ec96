use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use setup_mariadb_platform::{ApplyCommandEnv, CommandEnv};

use crate::ProvisionError;
use crate::download::download_installer;
use crate::step::CommandStep;

/// Carries out the side-effecting steps of a plan.
#[async_trait]
pub trait StepExecutor: Send + Sync {
    /// Run one command to completion.
    ///
    /// # Errors
    /// Returns an error if the command cannot be launched or exits non-zero.
    async fn run(&self, step: &CommandStep) -> Result<(), ProvisionError>;

    /// Fetch `url` into `destination`.
    ///
    /// # Errors
    /// Returns an error if the download or the write fails.
    async fn download(&self, url: &str, destination: &Path) -> Result<(), ProvisionError>;
}

/// Executes steps against the real host, with output streamed to the
/// inherited stdout/stderr.
#[derive(Debug, Clone)]
pub struct SystemExecutor {
    env: CommandEnv,
}

impl SystemExecutor {
    #[must_use]
    pub fn new(env: CommandEnv) -> Self {
        Self { env }
    }

    fn build_command(&self, step: &CommandStep) -> Command {
        let mut cmd = Command::new(&step.program);
        cmd.args(&step.args);
        cmd.apply_env(&self.env);
        if let Some(dir) = &step.current_dir {
            cmd.current_dir(dir);
        }
        if step.stdin.is_some() {
            cmd.stdin(Stdio::piped());
        }
        cmd
    }
}

impl Default for SystemExecutor {
    fn default() -> Self {
        Self::new(CommandEnv::ci())
    }
}

#[async_trait]
impl StepExecutor for SystemExecutor {
    async fn run(&self, step: &CommandStep) -> Result<(), ProvisionError> {
        let launch_error = |source| ProvisionError::CommandLaunch {
            command: step.command_line(),
            source,
        };

        let mut child = self.build_command(step).spawn().map_err(launch_error)?;

        let mut input_error = None;
        if let Some(input) = &step.stdin
            && let Some(mut stdin) = child.stdin.take()
        {
            input_error = stdin.write_all(input.as_bytes()).await.err();
            // Closing stdin lets the child see EOF.
            drop(stdin);
        }

        // A child that exits before reading its input breaks the pipe; its
        // exit status is the more useful report.
        let status = child.wait().await.map_err(launch_error)?;
        if !status.success() {
            return Err(ProvisionError::CommandFailed {
                command: step.command_line(),
                code: status.code(),
            });
        }

        match input_error {
            Some(source) => Err(ProvisionError::CommandInput {
                command: step.command_line(),
                source,
            }),
            None => Ok(()),
        }
    }

    async fn download(&self, url: &str, destination: &Path) -> Result<(), ProvisionError> {
        download_installer(url, destination).await
    }
}
