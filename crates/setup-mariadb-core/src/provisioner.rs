use std::path::Path;

use log::{info, warn};
use tempfile::TempDir;

use crate::ProvisionError;
use crate::config::ProvisionConfig;
use crate::executor::StepExecutor;
use crate::path_file::PathFile;
use crate::plan::{self, PlanInputs};
use crate::probe::HostProbe;
use crate::step::{BinDirectory, CommandStep, Plan, Step};
use crate::version::VersionSpec;

const WORK_DIR_PREFIX: &str = "mariadb-";

/// Installs, starts and prepares a MariaDB server for one CI job.
pub struct Provisioner<E, P> {
    executor: E,
    probe: P,
}

impl<E, P> Provisioner<E, P>
where
    E: StepExecutor,
    P: HostProbe,
{
    pub fn new(executor: E, probe: P) -> Self {
        Self { executor, probe }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Run the full procedure for `config` and return the server's binary
    /// directory.
    ///
    /// The version is validated and the plan built before anything on the
    /// host changes. Steps then run in order and the first failure aborts
    /// the run; earlier steps are not undone.
    ///
    /// # Errors
    /// Returns the validation, planning or step error that stopped the run.
    pub async fn provision(
        &self,
        config: &ProvisionConfig,
    ) -> Result<BinDirectory, ProvisionError> {
        let version = VersionSpec::parse(&config.version)?;
        info!("Setting up MariaDB {version} on {}", config.target.display_name());

        let work_dir = if config.target.is_windows() {
            Some(
                tempfile::Builder::new()
                    .prefix(WORK_DIR_PREFIX)
                    .tempdir()
                    .map_err(ProvisionError::WorkDir)?,
            )
        } else {
            None
        };
        let work_path = work_dir
            .as_ref()
            .map_or_else(std::env::temp_dir, |dir: &TempDir| dir.path().to_path_buf());

        let inputs = PlanInputs {
            version: &version,
            arch: config.arch,
            admin_user: config.admin_user(),
            work_dir: &work_path,
        };
        let plan = plan::select(config.target, &inputs, &self.probe)?;
        log::debug!("Planned {} steps", plan.steps.len());

        self.execute(&plan, config.path_file.as_deref()).await?;

        if let Some(database) = &config.database {
            self.create_database(&plan.bin_dir, database).await?;
        }

        Ok(plan.bin_dir)
    }

    async fn execute(&self, plan: &Plan, path_file: Option<&Path>) -> Result<(), ProvisionError> {
        for step in &plan.steps {
            info!("{step}");
            match step {
                Step::Run(command) => self.executor.run(command).await?,
                Step::Download { url, destination } => {
                    self.executor.download(url, destination).await?;
                }
                Step::ExportPath(bin) => match path_file {
                    Some(path) => PathFile::new(path).append(bin)?,
                    None => warn!("GITHUB_PATH is not set; not adding {bin} to PATH"),
                },
            }
        }
        Ok(())
    }

    /// Create `name` with the server's admin client.
    ///
    /// # Errors
    /// Returns [`ProvisionError::CommandFailed`] if `mysqladmin` exits
    /// non-zero, for example when the database already exists.
    pub async fn create_database(
        &self,
        bin: &BinDirectory,
        name: &str,
    ) -> Result<(), ProvisionError> {
        let step = CommandStep::new(bin.executable("mysqladmin")).args(["create", name]);
        info!("{step}");
        self.executor.run(&step).await
    }
}
