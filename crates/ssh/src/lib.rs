//! Reads `~/.ssh/config` into a flat list of host entries and composes the
//! `ssh` command line for each of them.

mod error;
mod host;
mod scanner;

pub use error::ScanError;
pub use host::HostEntry;
pub use scanner::{parse, scan, scan_default, ssh_config_path};
