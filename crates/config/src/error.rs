use crate::schema::ValidationError;
use std::io;
use thiserror::Error;

/// Error type for loading `~/.sshkeychain.json`.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Home directory not found.
    #[error("could not determine home directory")]
    NoHomeDir,

    /// Config file I/O error.
    #[error("failed to read config: {0}")]
    Io(#[from] io::Error),

    /// Not valid JSON at all.
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Valid JSON that does not match the schema.
    #[error("config validation failed: {}", format_validation_errors(.0))]
    ValidationFailed(Vec<ValidationError>),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
