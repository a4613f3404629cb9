use crate::error::ScanError;
use crate::host::HostEntry;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Returns the default SSH config file path (~/.ssh/config).
pub fn ssh_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".ssh").join("config"))
}

/// Scans the default SSH config file (~/.ssh/config).
///
/// # Errors
///
/// Returns `ScanError::NoHomeDir` if the home directory cannot be determined,
/// or `ScanError::Read` if the file exists but cannot be read.
pub fn scan_default() -> Result<Vec<HostEntry>, ScanError> {
    let path = ssh_config_path().ok_or(ScanError::NoHomeDir)?;
    scan(&path)
}

/// Scans an SSH config file and returns its host entries in file order.
///
/// Returns an empty list if the file doesn't exist.
///
/// # Errors
///
/// Returns `ScanError::Read` if the file exists but cannot be read.
pub fn scan(path: &Path) -> Result<Vec<HostEntry>, ScanError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("no SSH config at {}", path.display());
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(ScanError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let hosts = parse(&String::from_utf8_lossy(&bytes));
    debug!("found {} hosts in {}", hosts.len(), path.display());
    Ok(hosts)
}

/// Parses SSH config text into host entries.
///
/// Only `Host`, `HostName`, `User`, `Port` and `IdentityFile` are recognized,
/// each as a case-insensitive keyword followed by a single space. Everything
/// else, including directives before the first `Host` line, is ignored.
pub fn parse(contents: &str) -> Vec<HostEntry> {
    let mut hosts = Vec::new();
    let mut current: Option<Block> = None;

    for line in contents.lines() {
        let line = line.trim();

        if let Some(alias) = strip_keyword(line, "Host ") {
            hosts.extend(current.replace(Block::new(alias)).and_then(Block::finish));
            continue;
        }

        let Some(block) = current.as_mut() else {
            continue;
        };

        if let Some(value) = strip_keyword(line, "HostName ") {
            block.host_name = Some(value);
        } else if let Some(value) = strip_keyword(line, "User ") {
            block.user = Some(value);
        } else if let Some(value) = strip_keyword(line, "Port ") {
            block.port = Some(value);
        } else if let Some(value) = strip_keyword(line, "IdentityFile ") {
            block.identity_file = Some(value);
        }
    }

    hosts.extend(current.and_then(Block::finish));
    hosts
}

/// Matches `keyword` (including its trailing space) case-insensitively at
/// the start of `line` and returns the trimmed remainder.
fn strip_keyword<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    let head = line.get(..keyword.len())?;
    if !head.eq_ignore_ascii_case(keyword) {
        return None;
    }
    Some(line[keyword.len()..].trim())
}

/// Fields of the host block currently being read.
struct Block<'a> {
    alias: &'a str,
    host_name: Option<&'a str>,
    user: Option<&'a str>,
    port: Option<&'a str>,
    identity_file: Option<&'a str>,
}

impl<'a> Block<'a> {
    fn new(alias: &'a str) -> Self {
        Self {
            alias,
            host_name: None,
            user: None,
            port: None,
            identity_file: None,
        }
    }

    fn finish(self) -> Option<HostEntry> {
        if self.alias.is_empty() {
            return None;
        }

        Some(
            HostEntry::new(self.alias)
                .with_host_name(self.host_name.unwrap_or_default())
                .with_user(self.user.unwrap_or_default())
                .with_port(self.port.unwrap_or_default())
                .with_identity_file(self.identity_file.unwrap_or_default()),
        )
    }
}
