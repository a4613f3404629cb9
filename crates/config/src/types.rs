use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A configured program and its argument template.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProgramConfig {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

/// Contents of `~/.sshkeychain.json`. Every field is optional; unset fields
/// fall back to platform defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssh_config: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locator: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terminal: Option<ProgramConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shell: Option<ProgramConfig>,
}

impl Config {
    /// The configured SSH config path with a leading `~/` expanded.
    ///
    /// Returns `None` if no path is configured, or if it starts with `~/`
    /// and the home directory is unknown.
    pub fn ssh_config_path(&self) -> Option<PathBuf> {
        let raw = self.ssh_config.as_deref()?;
        expand_home(raw, dirs::home_dir().as_deref())
    }
}

fn expand_home(raw: &str, home: Option<&Path>) -> Option<PathBuf> {
    match raw.strip_prefix("~/") {
        Some(rest) => home.map(|home| home.join(rest)),
        None if raw == "~" => home.map(Path::to_path_buf),
        None => Some(PathBuf::from(raw)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.ssh_config.is_none());
        assert!(config.locator.is_none());
        assert!(config.terminal.is_none());
        assert!(config.shell.is_none());
        assert!(config.ssh_config_path().is_none());
    }

    #[test]
    fn test_expand_home() {
        let home = Path::new("/home/alice");
        assert_eq!(
            expand_home("~/.ssh/config", Some(home)),
            Some(PathBuf::from("/home/alice/.ssh/config"))
        );
        assert_eq!(expand_home("~", Some(home)), Some(PathBuf::from("/home/alice")));
        assert_eq!(
            expand_home("/etc/ssh/ssh_config", Some(home)),
            Some(PathBuf::from("/etc/ssh/ssh_config"))
        );
        assert_eq!(expand_home("~/x", None), None);
    }

    #[test]
    fn test_program_args_default_empty() {
        let program: ProgramConfig = serde_json::from_str(r#"{"program": "xterm"}"#).unwrap();
        assert_eq!(program.program, "xterm");
        assert!(program.args.is_empty());
    }
}
