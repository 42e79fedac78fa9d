use crate::brewfile::ParseError;
use crate::runner::CommandStatus;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BundleError {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Failed to read {}: {source}", .path.display())]
    ReadFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error during Homebrew installation: {0}")]
    BootstrapFailure(String),

    #[error("Failed to install: {line} ({status})")]
    CommandFailure { line: String, status: CommandStatus },

    #[error("Failed to install: {line} (could not run brew: {source})")]
    LaunchFailure {
        line: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed directive ({source}): {line}")]
    MalformedDirective {
        line: String,
        #[source]
        source: ParseError,
    },
}

pub type Result<T> = std::result::Result<T, BundleError>;
