use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Error type for SSH config scanning.
#[derive(Error, Debug)]
pub enum ScanError {
    /// Home directory not found.
    #[error("could not determine home directory")]
    NoHomeDir,

    /// The config file exists but could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
