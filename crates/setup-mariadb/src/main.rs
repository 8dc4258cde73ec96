mod logging;

use std::fmt::Write as _;
use std::process::ExitCode;

use serde::Serialize;
use setup_mariadb_core::{
    BinDirectory, ProvisionConfig, ProvisionError, Provisioner, SystemExecutor, SystemProbe,
};
use setup_mariadb_platform::{Arch, PlatformTarget};

#[derive(Serialize)]
struct HostSummary<'a> {
    target: PlatformTarget,
    arch: Arch,
    version: &'a str,
    database: Option<&'a str>,
}

impl<'a> From<&'a ProvisionConfig> for HostSummary<'a> {
    fn from(config: &'a ProvisionConfig) -> Self {
        Self {
            target: config.target,
            arch: config.arch,
            version: &config.version,
            database: config.database.as_deref(),
        }
    }
}

async fn run(config: &ProvisionConfig) -> Result<BinDirectory, ProvisionError> {
    let provisioner = Provisioner::new(SystemExecutor::default(), SystemProbe);
    provisioner.provision(config).await
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let config = ProvisionConfig::from_env();
    logging::init_logging(config.debug);

    if let Ok(summary) = serde_json::to_string(&HostSummary::from(&config)) {
        log::debug!("Host: {summary}");
    }

    match run(&config).await {
        Ok(bin) => {
            log::info!("MariaDB is ready, binaries in {bin}");
            ExitCode::SUCCESS
        }
        Err(error) => {
            let mut message = error.to_string();
            let mut source = std::error::Error::source(&error);
            while let Some(cause) = source {
                let _ = write!(message, "\n  caused by: {cause}");
                source = cause.source();
            }
            log::error!("{message}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use setup_mariadb_core::ProvisionConfig;
    use setup_mariadb_platform::{Arch, ManagedImage, PlatformTarget};

    use super::HostSummary;

    #[test]
    fn host_summary_serializes_target_and_inputs() {
        let config = ProvisionConfig {
            version: "10.6".to_string(),
            database: Some("app".to_string()),
            target: PlatformTarget::LinuxManagedImage(ManagedImage::Ubuntu20),
            arch: Arch::X64,
            user: None,
            path_file: None,
            debug: false,
        };

        let json = serde_json::to_value(HostSummary::from(&config)).expect("serialize summary");

        assert_eq!(json["target"]["image"], "ubuntu20");
        assert_eq!(json["arch"], "x64");
        assert_eq!(json["version"], "10.6");
        assert_eq!(json["database"], "app");
    }
}
