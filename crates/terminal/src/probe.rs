use std::process::{Command, Stdio};
use tracing::debug;

/// Resolves whether a program is on the search path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    /// Runs an external utility (`which`, `where`) with the program name as
    /// its argument. Any output on stdout counts as found.
    Command(String),
    /// Searches `PATH` in-process.
    Builtin,
}

impl Default for Locator {
    #[cfg(windows)]
    fn default() -> Self {
        Self::Command("where".to_string())
    }

    #[cfg(not(windows))]
    fn default() -> Self {
        Self::Command("which".to_string())
    }
}

impl From<&str> for Locator {
    fn from(s: &str) -> Self {
        match s {
            "builtin" => Self::Builtin,
            "" | "default" => Self::default(),
            other => Self::Command(other.to_string()),
        }
    }
}

impl Locator {
    /// Returns `true` if `bin` can be resolved. Errors count as not found.
    pub fn is_available(&self, bin: &str) -> bool {
        let found = match self {
            Self::Builtin => which::which(bin).is_ok(),
            Self::Command(utility) => match Command::new(utility)
                .arg(bin)
                .stdin(Stdio::null())
                .stderr(Stdio::null())
                .output()
            {
                Ok(output) => !output.stdout.is_empty(),
                Err(e) => {
                    debug!("{utility} failed for {bin}: {e}");
                    false
                }
            },
        };

        debug!("{bin} available: {found}");
        found
    }
}
