//! SSH host entry type.

use serde::Serialize;

/// One `Host` block from the SSH config file.
///
/// Fields that were not set in the file are empty strings. An entry is
/// never modified once its block has ended; the `with_*` builders exist for
/// constructing entries by hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostEntry {
    alias: String,
    host_name: String,
    user: String,
    port: String,
    identity_file: String,
}

impl HostEntry {
    /// Creates an entry with only the alias set.
    pub fn new(alias: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            host_name: String::new(),
            user: String::new(),
            port: String::new(),
            identity_file: String::new(),
        }
    }

    #[must_use]
    pub fn with_host_name(mut self, host_name: impl Into<String>) -> Self {
        self.host_name = host_name.into();
        self
    }

    #[must_use]
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }

    #[must_use]
    pub fn with_port(mut self, port: impl Into<String>) -> Self {
        self.port = port.into();
        self
    }

    #[must_use]
    pub fn with_identity_file(mut self, identity_file: impl Into<String>) -> Self {
        self.identity_file = identity_file.into();
        self
    }

    /// The identifier following the `Host` keyword.
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Value of `HostName`, empty if unset.
    pub fn host_name(&self) -> &str {
        &self.host_name
    }

    /// Value of `User`, empty if unset.
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Value of `Port`, empty if unset. Not validated as a number.
    pub fn port(&self) -> &str {
        &self.port
    }

    /// Value of `IdentityFile`, empty if unset.
    pub fn identity_file(&self) -> &str {
        &self.identity_file
    }

    /// Display title for a list item: `SSH to {alias}`.
    pub fn title(&self) -> String {
        format!("SSH to {}", self.alias)
    }

    /// Returns the command to execute, e.g. `ssh srv -l bob -p 2222`.
    ///
    /// The target is always the alias so that `ssh` resolves `HostName`
    /// itself. Only the identity file path is quoted.
    pub fn command(&self) -> String {
        let mut command = format!("ssh {}", self.alias);

        if !self.user.is_empty() {
            command.push_str(" -l ");
            command.push_str(&self.user);
        }

        if !self.port.is_empty() {
            command.push_str(" -p ");
            command.push_str(&self.port);
        }

        if !self.identity_file.is_empty() {
            command.push_str(" -i \"");
            command.push_str(&self.identity_file);
            command.push('"');
        }

        command
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_alias_only() {
        let host = HostEntry::new("prod-server");
        assert_eq!(host.command(), "ssh prod-server");
    }

    #[test]
    fn test_command_user_and_port() {
        let host = HostEntry::new("srv").with_user("bob").with_port("2222");
        assert_eq!(host.command(), "ssh srv -l bob -p 2222");
    }

    #[test]
    fn test_command_identity_file_is_quoted() {
        let host = HostEntry::new("srv").with_identity_file("/k/id");
        assert_eq!(host.command(), "ssh srv -i \"/k/id\"");
    }

    #[test]
    fn test_command_flag_order() {
        let host = HostEntry::new("srv")
            .with_identity_file("~/.ssh/id_ed25519")
            .with_port("22")
            .with_user("root");
        assert_eq!(
            host.command(),
            "ssh srv -l root -p 22 -i \"~/.ssh/id_ed25519\""
        );
    }

    #[test]
    fn test_command_ignores_host_name() {
        let host = HostEntry::new("web").with_host_name("10.0.0.5");
        assert_eq!(host.command(), "ssh web");
    }

    #[test]
    fn test_title() {
        assert_eq!(HostEntry::new("staging").title(), "SSH to staging");
    }

    #[test]
    fn test_unset_fields_are_empty() {
        let host = HostEntry::new("a");
        assert_eq!(host.host_name(), "");
        assert_eq!(host.user(), "");
        assert_eq!(host.port(), "");
        assert_eq!(host.identity_file(), "");
    }

    #[test]
    fn test_serialize() {
        let host = HostEntry::new("a").with_user("u");
        let json = serde_json::to_value(&host).unwrap();
        assert_eq!(json["alias"], "a");
        assert_eq!(json["user"], "u");
        assert_eq!(json["port"], "");
    }
}
