use std::path::PathBuf;

use config::{Config, ProgramConfig};
use ssh::{HostEntry, ScanError};
use terminal::{Invocation, Launcher, Locator, Program, Session};

/// Scans the SSH config and launches sessions with the configured terminal.
#[derive(Debug)]
pub struct Keychain {
    ssh_config: Option<PathBuf>,
    launcher: Launcher,
}

impl Keychain {
    /// Builds from settings. `ssh_config` takes precedence over the
    /// path in the settings file.
    pub fn new(config: &Config, ssh_config: Option<PathBuf>) -> Self {
        let mut launcher = Launcher::default().with_locator(
            config
                .locator
                .as_deref()
                .map(Locator::from)
                .unwrap_or_default(),
        );

        if let Some(terminal) = &config.terminal {
            launcher = launcher.with_terminal(to_program(terminal));
        }

        if let Some(shell) = &config.shell {
            launcher = launcher.with_shell(to_program(shell));
        }

        Self {
            ssh_config: ssh_config.or_else(|| config.ssh_config_path()),
            launcher,
        }
    }

    /// Hosts in file order, freshly scanned on every call.
    pub fn hosts(&self) -> Result<Vec<HostEntry>, ScanError> {
        match &self.ssh_config {
            Some(path) => ssh::scan(path),
            None => ssh::scan_default(),
        }
    }

    /// First host whose alias matches exactly.
    pub fn find(&self, alias: &str) -> Result<Option<HostEntry>, ScanError> {
        Ok(self.hosts()?.into_iter().find(|h| h.alias() == alias))
    }

    pub fn plan(&self, host: &HostEntry) -> Invocation {
        self.launcher.plan(host)
    }

    pub fn open(&self, host: &HostEntry) -> Result<Session, String> {
        self.launcher.open(host)
    }
}

fn to_program(config: &ProgramConfig) -> Program {
    Program::new(config.program.as_str(), config.args.iter().map(String::as_str))
}

/// One line per host: the title followed by whatever details are set.
pub fn render_item(host: &HostEntry) -> String {
    let details: Vec<String> = [
        ("host", host.host_name()),
        ("user", host.user()),
        ("port", host.port()),
        ("key", host.identity_file()),
    ]
    .into_iter()
    .filter(|(_, value)| !value.is_empty())
    .map(|(label, value)| format!("{label} {value}"))
    .collect();

    if details.is_empty() {
        host.title()
    } else {
        format!("{}  ({})", host.title(), details.join(", "))
    }
}
