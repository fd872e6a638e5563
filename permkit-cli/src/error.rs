//! This module defines all the errors that can occur while executing permkit-cli.

use std::path::PathBuf;

use thiserror::Error;

/// Error that occur during execution of permkit's CLI app
#[derive(Error, Debug)]
pub enum CliError {
    /// Error while reading a file of permutations
    #[error("unable to parse line {line} of `{filename}`: {error}")]
    InvalidInputLine {
        /// Name of the file
        filename: PathBuf,
        /// Line number, starting at 1
        line: usize,
        /// What went wrong
        error: permkit::Error,
    },
    /// Error while serializing results
    #[error("unable to serialize results: {0}")]
    Serialization(#[from] serde_json::Error),
    /// Error resulting from io operations
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    /// Error originating from permkit
    #[error(transparent)]
    PermkitError(#[from] permkit::Error),
}
