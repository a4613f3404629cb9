/// Placeholder replaced by the command in argument templates.
pub const PLACEHOLDER: &str = "{}";

/// An external program with its launch arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    /// Binary name or path.
    pub bin: String,
    /// Arguments to execute a command.
    /// Use {} as placeholder for the command
    pub args: Vec<String>,
}

impl Program {
    pub fn new<I, S>(bin: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            bin: bin.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Preferred terminal emulator for the current platform.
    #[cfg(windows)]
    pub fn default_terminal() -> Self {
        Self::new("wt.exe", ["-p", "\"Command Prompt\"", PLACEHOLDER])
    }

    /// Preferred terminal emulator for the current platform.
    #[cfg(not(windows))]
    pub fn default_terminal() -> Self {
        Self::new(
            "x-terminal-emulator",
            ["-e", "sh", "-c", "{}; exec \"${SHELL:-sh}\""],
        )
    }

    /// Shell used when the preferred terminal is missing. It stays open
    /// after the command exits.
    #[cfg(windows)]
    pub fn default_shell() -> Self {
        Self::new("cmd.exe", ["/k", PLACEHOLDER])
    }

    /// Shell used when the preferred terminal is missing. It stays open
    /// after the command exits.
    #[cfg(not(windows))]
    pub fn default_shell() -> Self {
        Self::new("sh", ["-c", "{}; exec \"${SHELL:-sh}\""])
    }

    /// Arguments with every placeholder replaced by `command`.
    pub fn render(&self, command: &str) -> Vec<String> {
        self.args
            .iter()
            .map(|arg| arg.replace(PLACEHOLDER, command))
            .collect()
    }
}
