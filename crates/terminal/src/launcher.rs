use crate::probe::Locator;
use crate::program::Program;
use ssh::HostEntry;
use std::fmt;
use std::io;
use std::process::{Child, Command, ExitStatus};
use tracing::{debug, info, warn};

/// Result of a launch attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The session was spawned; the caller should dismiss its UI.
    Success,
    /// Nothing was spawned. Carries a message for the user.
    Failure(String),
}

/// Which program a launch goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// The preferred terminal emulator was found.
    Terminal,
    /// Fallback shell.
    Shell,
}

/// A fully resolved process to spawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub route: Route,
    pub bin: String,
    pub args: Vec<String>,
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bin)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Opens a console window for the process on Windows.
#[cfg(windows)]
const CREATE_NEW_CONSOLE: u32 = 0x0000_0010;

impl Invocation {
    /// Spawns the process without waiting for it.
    fn spawn(&self) -> io::Result<Child> {
        let mut command = Command::new(&self.bin);

        // Windows programs parse their own command line, so the rendered
        // arguments are passed verbatim.
        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;
            command.raw_arg(self.args.join(" "));
            if self.route == Route::Shell {
                command.creation_flags(CREATE_NEW_CONSOLE);
            }
        }

        #[cfg(not(windows))]
        command.args(&self.args);

        command.spawn()
    }
}

/// A spawned SSH session.
///
/// On Unix the fallback shell has no window of its own: it shares the
/// caller's terminal and is only usable while the caller waits for it.
#[derive(Debug)]
pub struct Session {
    route: Route,
    child: Child,
}

impl Session {
    pub fn route(&self) -> Route {
        self.route
    }

    /// Whether the session runs on the caller's terminal and must be
    /// waited for to stay in the foreground.
    pub fn needs_terminal(&self) -> bool {
        cfg!(not(windows)) && self.route == Route::Shell
    }

    /// Blocks until the session exits.
    ///
    /// # Errors
    ///
    /// Returns an error if the process status cannot be collected.
    pub fn wait(mut self) -> io::Result<ExitStatus> {
        self.child.wait()
    }
}

/// Opens SSH sessions in a terminal, falling back to a shell.
#[derive(Debug, Clone, Default)]
pub struct Launcher {
    terminal: Option<Program>,
    shell: Option<Program>,
    locator: Locator,
}

impl Launcher {
    pub fn new(terminal: Program, shell: Program, locator: Locator) -> Self {
        Self {
            terminal: Some(terminal),
            shell: Some(shell),
            locator,
        }
    }

    #[must_use]
    pub fn with_terminal(mut self, terminal: Program) -> Self {
        self.terminal = Some(terminal);
        self
    }

    #[must_use]
    pub fn with_shell(mut self, shell: Program) -> Self {
        self.shell = Some(shell);
        self
    }

    #[must_use]
    pub fn with_locator(mut self, locator: Locator) -> Self {
        self.locator = locator;
        self
    }

    pub fn terminal(&self) -> Program {
        self.terminal.clone().unwrap_or_else(Program::default_terminal)
    }

    pub fn shell(&self) -> Program {
        self.shell.clone().unwrap_or_else(Program::default_shell)
    }

    /// Resolves the process that [`launch`](Self::launch) would spawn.
    ///
    /// Probes for the terminal on every call.
    pub fn plan(&self, host: &HostEntry) -> Invocation {
        let command = host.command();
        let terminal = self.terminal();

        let (route, program) = if self.locator.is_available(&terminal.bin) {
            (Route::Terminal, terminal)
        } else {
            debug!("{} not found, falling back to shell", terminal.bin);
            (Route::Shell, self.shell())
        };

        Invocation {
            route,
            args: program.render(&command),
            bin: program.bin,
        }
    }

    /// Spawns the session for `host` and hands it back to the caller.
    ///
    /// # Errors
    ///
    /// Returns a message for the user if the process cannot be spawned.
    pub fn open(&self, host: &HostEntry) -> Result<Session, String> {
        let invocation = self.plan(host);

        match invocation.spawn() {
            Ok(child) => {
                info!("launched {} via {}", host.alias(), invocation.bin);
                Ok(Session {
                    route: invocation.route,
                    child,
                })
            }
            Err(e) => {
                let message = format!("Failed to launch {}: {}", invocation.bin, e);
                warn!("{message}");
                Err(message)
            }
        }
    }

    /// Launches an SSH session for `host`. Never waits for the session.
    pub fn launch(&self, host: &HostEntry) -> Outcome {
        match self.open(host) {
            // Not reaped: the session outlives this call. Long-lived callers
            // that need to collect it should use `open` instead.
            Ok(_session) => Outcome::Success,
            Err(message) => Outcome::Failure(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host() -> HostEntry {
        HostEntry::new("srv").with_user("bob").with_port("2222")
    }

    #[test]
    fn test_unavailable_terminal_falls_back_to_shell() {
        let launcher = Launcher::new(
            Program::new("my-terminal", ["-e", "{}"]),
            Program::new("my-shell", ["-c", "{}"]),
            Locator::Command("/nonexistent/locator".into()),
        );

        let invocation = launcher.plan(&host());
        assert_eq!(invocation.route, Route::Shell);
        assert_eq!(invocation.bin, "my-shell");
        assert_eq!(invocation.args, vec!["-c", "ssh srv -l bob -p 2222"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_available_terminal_is_preferred() {
        let launcher = Launcher::new(
            Program::new("my-terminal", ["-e", "{}"]),
            Program::new("my-shell", ["-c", "{}"]),
            Locator::Command("echo".into()),
        );

        let invocation = launcher.plan(&host());
        assert_eq!(invocation.route, Route::Terminal);
        assert_eq!(invocation.bin, "my-terminal");
        assert_eq!(invocation.args, vec!["-e", "ssh srv -l bob -p 2222"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_launch_fallback_success() {
        let launcher = Launcher::new(
            Program::new("/nonexistent/terminal", ["{}"]),
            Program::new("true", ["{}"]),
            Locator::Builtin,
        );

        assert_eq!(launcher.launch(&host()), Outcome::Success);
    }

    #[test]
    fn test_launch_spawn_error_is_failure() {
        let launcher = Launcher::new(
            Program::new("/nonexistent/terminal", ["{}"]),
            Program::new("/nonexistent/shell", ["{}"]),
            Locator::Builtin,
        );

        match launcher.launch(&host()) {
            Outcome::Failure(message) => {
                assert!(!message.is_empty());
                assert!(message.contains("/nonexistent/shell"));
            }
            Outcome::Success => panic!("Expected Failure"),
        }
    }

    #[test]
    fn test_default_launcher_uses_platform_programs() {
        let launcher = Launcher::default();
        assert_eq!(launcher.terminal(), Program::default_terminal());
        assert_eq!(launcher.shell(), Program::default_shell());
    }

    #[test]
    fn test_invocation_display() {
        let invocation = Invocation {
            route: Route::Shell,
            bin: "sh".into(),
            args: vec!["-c".into(), "ssh a".into()],
        };
        assert_eq!(invocation.to_string(), "sh -c ssh a");
    }

    #[cfg(unix)]
    #[test]
    fn test_fallback_shell_session_can_be_waited_for() {
        let launcher = Launcher::new(
            Program::new("/nonexistent/terminal", ["{}"]),
            Program::new("sh", ["-c", "exit 7", "{}"]),
            Locator::Builtin,
        );

        let session = launcher.open(&host()).unwrap();
        assert_eq!(session.route(), Route::Shell);
        assert!(session.needs_terminal());

        let status = session.wait().unwrap();
        assert_eq!(status.code(), Some(7));
    }

    #[cfg(unix)]
    #[test]
    fn test_terminal_session_does_not_need_caller_terminal() {
        let launcher = Launcher::new(
            Program::new("true", ["{}"]),
            Program::new("/nonexistent/shell", ["{}"]),
            Locator::Builtin,
        );

        let session = launcher.open(&host()).unwrap();
        assert_eq!(session.route(), Route::Terminal);
        assert!(!session.needs_terminal());
        assert!(session.wait().unwrap().success());
    }

    #[test]
    fn test_open_spawn_error() {
        let launcher = Launcher::new(
            Program::new("/nonexistent/terminal", ["{}"]),
            Program::new("/nonexistent/shell", ["{}"]),
            Locator::Builtin,
        );

        let message = launcher.open(&host()).unwrap_err();
        assert!(message.contains("/nonexistent/shell"));
    }
}
