//! Per-platform installation procedures.
//!
//! Planning is pure apart from the read-only [`HostProbe`] queries: it turns a
//! validated version and the host facts into an ordered [`Plan`] without
//! touching the system. Execution happens in [`crate::Provisioner`].

use std::path::Path;

use setup_mariadb_platform::{Arch, HomebrewPaths, ManagedImage, PlatformTarget};

use crate::ProvisionError;
use crate::probe::HostProbe;
use crate::step::{BinDirectory, CommandStep, Plan, Step};
use crate::version::VersionSpec;

const INSTALLER_FILE: &str = "mariadb.msi";
const APT_KEYRING_DIR: &str = "/etc/apt/keyrings";
const APT_KEYRING: &str = "/etc/apt/keyrings/mariadb-keyring.pgp";
const APT_SIGNING_KEY_URL: &str = "https://mariadb.org/mariadb_release_signing_key.pgp";
const APT_SOURCES_FILE: &str = "/etc/apt/sources.list.d/mariadb.sources";
const LINUX_BIN_DIR: &str = "/usr/bin";

pub struct PlanInputs<'a> {
    pub version: &'a VersionSpec,
    pub arch: Arch,
    pub admin_user: &'a str,
    /// Scratch directory for downloaded installers.
    pub work_dir: &'a Path,
}

/// Choose and build the single procedure for `target`.
///
/// # Errors
/// Returns an error when the version has no installer mapping (Windows) or
/// the release codename cannot be determined (Linux without a managed image).
pub fn select<P>(
    target: PlatformTarget,
    inputs: &PlanInputs<'_>,
    probe: &P,
) -> Result<Plan, ProvisionError>
where
    P: HostProbe + ?Sized,
{
    match target {
        PlatformTarget::MacOs => Ok(macos(inputs, probe)),
        PlatformTarget::Windows => windows(inputs),
        PlatformTarget::LinuxManagedImage(image) => {
            Ok(linux(inputs, Some(image), image.codename()))
        }
        PlatformTarget::LinuxOther => {
            let suite = probe.release_codename()?;
            Ok(linux(inputs, None, &suite))
        }
    }
}

fn macos<P: HostProbe + ?Sized>(inputs: &PlanInputs<'_>, probe: &P) -> Plan {
    let brew = HomebrewPaths::for_arch(inputs.arch);
    let formula = inputs.version.homebrew_formula();
    let bin_dir = BinDirectory::posix(brew.formula_bin(&formula).display().to_string());
    let mut steps = Vec::new();

    let formula_known = brew
        .formula_definitions(&formula)
        .iter()
        .any(|path| probe.path_exists(path));
    if !formula_known {
        steps.push(Step::Run(CommandStep::new("brew").arg("update")));
    }

    steps.push(Step::Run(CommandStep::new("brew").args(["install", formula.as_str()])));
    steps.push(Step::Run(
        CommandStep::new(bin_dir.executable("mysql.server")).arg("start"),
    ));
    steps.push(Step::ExportPath(bin_dir.clone()));

    if inputs.version.needs_anonymous_grant() {
        let mysql = bin_dir.executable("mysql");
        for statement in [
            "GRANT ALL PRIVILEGES ON *.* TO ''@'localhost'",
            "FLUSH PRIVILEGES",
        ] {
            steps.push(Step::Run(root_client(&mysql, statement)));
        }
    }

    Plan { steps, bin_dir }
}

fn windows(inputs: &PlanInputs<'_>) -> Result<Plan, ProvisionError> {
    let full_version = inputs.version.full_version()?;
    let bin_dir = BinDirectory::windows(format!(
        "C:\\Program Files\\MariaDB {}\\bin",
        inputs.version.tag()
    ));
    let mysql = bin_dir.executable("mysql");

    let mut steps = vec![
        Step::Download {
            url: installer_url(full_version),
            destination: inputs.work_dir.join(INSTALLER_FILE),
        },
        Step::Run(
            CommandStep::new("msiexec")
                .args(["/i", INSTALLER_FILE, "SERVICENAME=MariaDB", "/qn"])
                .current_dir(inputs.work_dir),
        ),
        Step::ExportPath(bin_dir.clone()),
    ];
    steps.extend(
        admin_account_statements(inputs.admin_user)
            .iter()
            .map(|statement| Step::Run(root_client(&mysql, statement))),
    );

    Ok(Plan { steps, bin_dir })
}

fn linux(inputs: &PlanInputs<'_>, image: Option<ManagedImage>, suite: &str) -> Plan {
    let bin_dir = BinDirectory::posix(LINUX_BIN_DIR);
    let mut steps = Vec::new();

    // Managed images ship a running MySQL that owns the data directory.
    if image.is_some() {
        steps.push(Step::Run(CommandStep::sudo("systemctl", ["stop", "mysql.service"])));
        steps.push(Step::Run(CommandStep::sudo("rm", ["-rf", "/var/lib/mysql"])));
    }

    steps.push(Step::Run(CommandStep::sudo("mkdir", ["-p", APT_KEYRING_DIR])));
    steps.push(Step::Run(CommandStep::sudo(
        "curl",
        ["-fsSL", "-o", APT_KEYRING, APT_SIGNING_KEY_URL],
    )));
    steps.push(Step::Run(
        CommandStep::sudo("tee", [APT_SOURCES_FILE])
            .stdin(apt_sources(inputs.version.tag(), suite)),
    ));
    steps.push(Step::Run(CommandStep::sudo(
        "apt-get",
        [
            "update",
            "-o",
            "Dir::Etc::sourcelist=sources.list.d/mariadb.sources",
            "-o",
            "Dir::Etc::sourceparts=-",
            "-o",
            "APT::Get::List-Cleanup=0",
        ],
    )));
    let package = inputs.version.apt_package();
    steps.push(Step::Run(CommandStep::sudo("apt-get", ["install", "-y", package.as_str()])));
    steps.push(Step::Run(CommandStep::sudo("systemctl", ["start", "mariadb"])));
    steps.push(Step::Run(CommandStep::sudo("mysqladmin", ["-proot", "password", ""])));
    steps.extend(
        admin_account_statements(inputs.admin_user)
            .iter()
            .map(|statement| Step::Run(CommandStep::sudo("mysql", ["-e", statement.as_str()]))),
    );

    // `/usr/bin` is already on every runner's PATH.
    Plan { steps, bin_dir }
}

fn installer_url(full_version: &str) -> String {
    format!(
        "https://downloads.mariadb.com/MariaDB/mariadb-{full_version}/winx64-packages/mariadb-{full_version}-winx64.msi"
    )
}

/// deb822 source entry for the MariaDB repository of one release series.
fn apt_sources(tag: &str, suite: &str) -> String {
    format!(
        "X-Repolib-Name: MariaDB\n\
         Types: deb\n\
         URIs: https://deb.mariadb.org/{tag}/ubuntu\n\
         Suites: {suite}\n\
         Components: main main/debug\n\
         Signed-By: {APT_KEYRING}\n"
    )
}

fn admin_account_statements(user: &str) -> [String; 3] {
    let account = format!("'{}'@'localhost'", user.replace('\'', "''"));
    [
        format!("CREATE USER {account} IDENTIFIED BY ''"),
        format!("GRANT ALL PRIVILEGES ON *.* TO {account}"),
        "FLUSH PRIVILEGES".to_string(),
    ]
}

fn root_client(mysql: &str, statement: &str) -> CommandStep {
    CommandStep::new(mysql).args(["-u", "root", "-e", statement])
}
